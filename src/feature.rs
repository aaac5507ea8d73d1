//! Camera feature identifiers and value kinds.
//!
//! The agent exposes ~30 heterogeneous camera controls through four generic
//! opcode pairs (`SET/GET_FEATURE_VALUE`, `SET/GET_FEATURE_ABS_VALUE`,
//! `SET/GET_FEATURE_MODE`).  Each feature id carries an access kind: plain
//! integer, paired integer (white-balance red/blue), or absolute, meaning a
//! physical float carried on the integer-only wire as its IEEE-754 binary32
//! bit pattern.  Mode (manual/auto/once/extern) is orthogonal and uses the
//! mode opcode pair.
//!
//! Base features (0..) are camera registers; extended features (200..) are
//! computed by the agent itself (auto-exposure servo parameters, ROI
//! rectangle, exposure delay).

use clap::ValueEnum;
use serde::Serialize;

/// First extended (agent-computed) feature code.
pub const FEATURE_EXTENDED_BASE: i32 = 200;

/// A camera control addressable through the generic feature opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[repr(i32)]
pub enum Feature {
    Brightness = 0,
    Exposure = 1,
    Hue = 2,
    Saturation = 3,
    Gamma = 4,
    Shutter = 5,
    Gain = 6,
    Iris = 7,
    Focus = 8,
    FrameRate = 9,
    Zoom = 10,
    WhiteBalance = 11,
    AeAlg = 12,
    AeTol = 13,
    AeMax = 14,
    AeMin = 15,
    AeOutliers = 16,
    AeRate = 17,
    RegLeft = 18,
    RegTop = 19,
    RegRight = 20,
    RegBottom = 21,

    // Extended, computed by the agent rather than the camera.
    ExtAeAlg = 200,
    ExtAeTarget = 201,
    ExtAeTol = 202,
    ExtAeMax = 203,
    ExtAeMin = 204,
    ExtAeOutliers = 205,
    ExtAeRate = 206,
    ExtAeMaxFrames = 207,
    ExtAeRegion = 208,
    RoiX = 209,
    RoiY = 210,
    RoiWidth = 211,
    RoiHeight = 212,
    ExpDelay = 213,
}

impl Feature {
    /// The wire code for this feature.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this feature is computed by the agent (code 200 and up).
    pub fn is_extended(self) -> bool {
        self.code() >= FEATURE_EXTENDED_BASE
    }

    /// The access kind this feature is read and written with.
    pub fn kind(self) -> FeatureKind {
        use Feature::*;
        match self {
            Shutter | Exposure | AeTol | AeMax | AeMin | AeOutliers | AeRate | ExtAeTarget
            | ExtAeTol | ExtAeMax | ExtAeMin | ExtAeOutliers | ExtAeRate | ExpDelay => {
                FeatureKind::Abs
            }
            WhiteBalance => FeatureKind::Pair,
            _ => FeatureKind::Int,
        }
    }
}

/// How a feature's value travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Plain integer in `arg1`/`val1`.
    Int,
    /// Two related integers in `arg1,arg2`/`val1,val2`.
    Pair,
    /// IEEE-754 binary32 bit pattern in `arg1`/`val1`.
    Abs,
}

/// A typed feature value, matched to the feature's [`FeatureKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FeatureValue {
    Int(i32),
    Pair(i32, i32),
    Abs(f32),
}

impl FeatureValue {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureValue::Int(_) => FeatureKind::Int,
            FeatureValue::Pair(..) => FeatureKind::Pair,
            FeatureValue::Abs(_) => FeatureKind::Abs,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FeatureValue::Int(_) => "integer",
            FeatureValue::Pair(..) => "paired integer",
            FeatureValue::Abs(_) => "absolute",
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Pair(r, b) => write!(f, "{r},{b}"),
            FeatureValue::Abs(v) => write!(f, "{v}"),
        }
    }
}

/// Feature control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[repr(i32)]
pub enum FeatureMode {
    Manual = 0,
    Auto = 1,
    Once = 2,
    Extern = 3,
}

impl FeatureMode {
    pub fn from_i32(v: i32) -> Option<FeatureMode> {
        match v {
            0 => Some(FeatureMode::Manual),
            1 => Some(FeatureMode::Auto),
            2 => Some(FeatureMode::Once),
            3 => Some(FeatureMode::Extern),
            _ => None,
        }
    }
}

/// Auto-exposure algorithm selection (`AeAlg`/`ExtAeAlg` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AeAlgorithm {
    Mean = 0,
    Range = 1,
}

/// Auto-exposure metering region selection (`ExtAeRegion` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AeRegion {
    Full = 0,
    Roi = 1,
}

/// Frame discard policy for `DiscardFrames`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[repr(i32)]
pub enum DiscardMode {
    /// Discard a fixed number of frames.
    Fixed = 0,
    /// Discard until the shutter has settled.
    Shutter = 1,
    /// Discard until the gain has settled.
    Gain = 2,
}

// ── Float bit reinterpretation ────────────────────────────────────────────────
//
// The wire format has no float type; absolute feature values travel as the
// bit pattern of an IEEE-754 binary32 in a signed 32-bit field.  The round
// trip must be exact.

/// Reinterpret a float's bits as the wire integer.
pub fn float_as_int(v: f32) -> i32 {
    v.to_bits() as i32
}

/// Reinterpret a wire integer's bits as the float they encode.
pub fn int_as_float(v: i32) -> f32 {
    f32::from_bits(v as u32)
}
