//! Wire protocol definitions for the rover agent link.
//!
//! The agent speaks a fixed-format binary request/response protocol over TCP:
//! every packet starts with a 32-byte header, responses may carry a trailing
//! payload.  This module holds the protocol constants (packet magic, version,
//! fixed-point scale factors, subsystem and command numbering, status codes)
//! exactly as the agent defines them.  The header codec itself lives in
//! [`packet`].
//!
//! All integers on the wire are little-endian.  The agent platform packs its
//! packet struct natively on a little-endian CPU and unpacks metadata arrays
//! with an explicit little-endian pattern, so LE is the observed on-wire
//! order and is treated as part of the external contract.

pub mod packet;

/// Magic sentinel at the start of every packet.
pub const IDENT: u32 = 0xB0AD_1CEA;

/// Fixed header length in bytes (requests are exactly this long).
pub const PKT_LEN: usize = 32;

/// Protocol version the client is compiled against.
pub const PROTOCOL_VERSION: i32 = 3;
/// Protocol minor version the client is compiled against.
pub const PROTOCOL_MINOR: i32 = 2;

// ── Fixed-point scale factors ─────────────────────────────────────────────────

/// Degrees → wire units for arm and PTU joint angles.
pub const ANG_SCALE: f64 = 1_000_000.0;
/// Degrees → wire units for IMU and GPS angles.
pub const ANG_SCALE_FINE: f64 = 10_000_000.0;
/// Seconds → wire units (µs) for shutter times.
pub const SHUTTER_SCALE: f64 = 1_000_000.0;
/// Metres → wire units (mm) for altitudes and heights.
pub const DIST_SCALE: f64 = 1_000.0;

// ── Camera ids ────────────────────────────────────────────────────────────────

/// Left wide-angle camera (PanCam channel 0, master).
pub const CAMERA_WACL: i32 = 0;
/// Right wide-angle camera (PanCam channel 1).
pub const CAMERA_WACR: i32 = 1;
/// High-resolution camera (PanCam channel 2).
pub const CAMERA_HRC: i32 = 2;
/// Number of PanCam cameras.
pub const PANCAM_NUM_CAMS: i32 = 3;

/// Aerobot multispectral camera.
pub const CAMERA_AEROCAM: i32 = 0;

/// Display name for a PanCam camera id.
pub fn pancam_camera_name(camera_id: i32) -> &'static str {
    match camera_id {
        CAMERA_WACL => "LWAC",
        CAMERA_WACR => "RWAC",
        CAMERA_HRC => "HRC",
        _ => "?",
    }
}

// ── Image & metadata request flag bits ────────────────────────────────────────

/// Save camera info (shutter, gain, filter, …) with the next image.
pub const META_SAVE_CAM: i32 = 0x0001;
/// Save IMU orientation with the next image.
pub const META_SAVE_IMU: i32 = 0x0002;
/// Save GPS position with the next image.
pub const META_SAVE_GPS: i32 = 0x0004;
/// All metadata groups.
pub const META_SAVE_ALL: i32 = 0x0007;

/// Run the auto-exposure loop before capturing.
pub const IMAGE_AUTOEXPOSE: i32 = 0x0100;
/// Return the previously captured frame instead of exposing a new one.
pub const IMAGE_PREVIOUS: i32 = 0x0200;
/// Synchronized capture across cameras.
pub const IMAGE_SYNC: i32 = 0x0400;

// ── Status codes ──────────────────────────────────────────────────────────────

/// Agent response status.  Any non-zero value means the call did not complete
/// as requested and the payload, if any, is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    Ok = 0,
    Error = 1,
    NotImplemented = 2,
    BadSubsystem = 3,
    BadFunction = 4,
    BadParam = 5,
}

impl Status {
    pub fn from_u16(v: u16) -> Option<Status> {
        match v {
            0 => Some(Status::Ok),
            1 => Some(Status::Error),
            2 => Some(Status::NotImplemented),
            3 => Some(Status::BadSubsystem),
            4 => Some(Status::BadFunction),
            5 => Some(Status::BadParam),
            _ => None,
        }
    }
}

/// Human-readable description of a status code, as the agent documents them.
pub fn status_text(status: u16) -> &'static str {
    match Status::from_u16(status) {
        Some(Status::Ok) => "okay",
        Some(Status::Error) => "general error",
        Some(Status::NotImplemented) => "rover function not implemented",
        Some(Status::BadSubsystem) => "unknown rover subsystem",
        Some(Status::BadFunction) => "unknown subsystem function",
        Some(Status::BadParam) => "bad subsystem function parameter",
        None => "unknown status",
    }
}

// ── Subsystems ────────────────────────────────────────────────────────────────

/// Rover subsystems addressable over the agent link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Subsystem {
    None = 0,
    System = 1,
    PanCam = 2,
    Mast = 3,
    Arm = 4,
    Chassis = 5,
    Vicon = 6,
    AeroCam = 7,
    Aerobot = 8,
}

impl Subsystem {
    pub fn from_u16(v: u16) -> Option<Subsystem> {
        match v {
            0 => Some(Subsystem::None),
            1 => Some(Subsystem::System),
            2 => Some(Subsystem::PanCam),
            3 => Some(Subsystem::Mast),
            4 => Some(Subsystem::Arm),
            5 => Some(Subsystem::Chassis),
            6 => Some(Subsystem::Vicon),
            7 => Some(Subsystem::AeroCam),
            8 => Some(Subsystem::Aerobot),
            _ => None,
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────
//
// Command 0 is reserved in every subsystem and never sent.

/// System-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SystemCmd {
    Connect = 1,
    Disconnect = 2,
    Shutdown = 3,
    GetVersion = 4,
}

/// Camera commands, shared by the PanCam and AeroCam subsystems.
///
/// The numbering is identical for both; `GetLastImage` exists on PanCam only
/// (the AeroCam command set ends at `DiscardFrames`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum CamCmd {
    GetImage = 1,
    SetFeatureValue = 2,
    GetFeatureValue = 3,
    SetFeatureMode = 4,
    GetFeatureMode = 5,
    SetImageFormat = 6,
    GetImageFormat = 7,
    SetFilter = 8,
    GetFilter = 9,
    StowFilters = 10,
    SetFeatureAbsValue = 11,
    GetFeatureAbsValue = 12,
    GetConfig = 13,
    GetImageMetadata = 14,
    DiscardFrames = 15,
    GetLastImage = 16,
}

/// Mast pan-tilt unit commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum PtuCmd {
    SetAllJoints = 1,
    SetOneJoint = 2,
    Stow = 3,
    GetJoints = 4,
}

/// Arm commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ArmCmd {
    SetAllJoints = 1,
    SetOneJoint = 2,
    Stow = 3,
    GetJoints = 4,
}

/// Vicon motion-capture interface commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ViconCmd {
    GetPanTilt = 1,
}

/// Aerobot platform commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum AerobotCmd {
    GetOrientation = 1,
    GetPosition = 2,
    GetHeight = 3,
    GetTetherAngles = 4,
    ResetImu = 5,
}

// ── Joint numbering and angle readout selection ───────────────────────────────

/// Mast PTU joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PtuJoint {
    Pan = 0,
    Tilt = 1,
}

/// Arm joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ArmJoint {
    Base = 0,
    Shoulder = 1,
    Elbow = 2,
}

/// Which joint-angle reading a `GetJoints` request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum JointSelect {
    /// The last commanded angles.
    Commanded = 0,
    /// Commanded angles rounded to achievable positions.
    Rounded = 1,
    /// Measured (encoder) angles.
    Measured = 2,
}
