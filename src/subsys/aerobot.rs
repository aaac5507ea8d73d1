//! Aerobot platform client: IMU orientation, GPS position, tether state.
//!
//! IMU and GPS angles use the fine ×10,000,000 fixed-point scale; altitude
//! and height are millimetres on the wire.

use serde::Serialize;

use crate::error::Result;
use crate::proto::{AerobotCmd, Subsystem};
use crate::transport::Transport;

use super::{wire_to_deg_fine, wire_to_metres};

/// A GPS fix.  `fix_mode` is the receiver's raw fix-mode value, passed
/// through untranslated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub fix_mode: i32,
}

/// Read (roll, pitch, yaw) in degrees from the IMU.
pub fn get_orientation(conn: &mut impl Transport) -> Result<(f64, f64, f64)> {
    let resp = conn
        .command_response(Subsystem::Aerobot, AerobotCmd::GetOrientation as u16, [0; 4])?
        .check()?;
    Ok((
        wire_to_deg_fine(resp.vals[0]),
        wire_to_deg_fine(resp.vals[1]),
        wire_to_deg_fine(resp.vals[2]),
    ))
}

/// Read the current GPS fix.
pub fn get_position(conn: &mut impl Transport) -> Result<GpsFix> {
    let resp = conn
        .command_response(Subsystem::Aerobot, AerobotCmd::GetPosition as u16, [0; 4])?
        .check()?;
    Ok(GpsFix {
        latitude: wire_to_deg_fine(resp.vals[0]),
        longitude: wire_to_deg_fine(resp.vals[1]),
        altitude: wire_to_metres(resp.vals[2]),
        fix_mode: resp.vals[3],
    })
}

/// Read the platform height above ground in metres.
pub fn get_height(conn: &mut impl Transport) -> Result<f64> {
    let resp = conn
        .command_response(Subsystem::Aerobot, AerobotCmd::GetHeight as u16, [0; 4])?
        .check()?;
    Ok(wire_to_metres(resp.vals[0]))
}

/// Read the tether (azimuth, elevation) in degrees.
pub fn get_tether_angles(conn: &mut impl Transport) -> Result<(f64, f64)> {
    let resp = conn
        .command_response(Subsystem::Aerobot, AerobotCmd::GetTetherAngles as u16, [0; 4])?
        .check()?;
    Ok((wire_to_deg_fine(resp.vals[0]), wire_to_deg_fine(resp.vals[1])))
}

/// Re-zero the IMU.
pub fn reset_imu(conn: &mut impl Transport) -> Result<()> {
    conn.command_response(Subsystem::Aerobot, AerobotCmd::ResetImu as u16, [0; 4])?
        .check()?;
    Ok(())
}
