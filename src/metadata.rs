//! Image metadata decoding.
//!
//! `GetImageMetadata` returns a fixed 18-element array of little-endian
//! signed 32-bit integers plus a save-flags word (`val2`).  The flags say
//! which groups the agent actually populated: camera info, IMU orientation,
//! GPS position.  Groups whose flag bit is unset are absent, not
//! zero-but-valid, so each group decodes to an `Option`.

use byteorder::{ByteOrder, LittleEndian as LE};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AgentError, Result};
use crate::proto::{ANG_SCALE_FINE, DIST_SCALE, META_SAVE_CAM, META_SAVE_GPS, META_SAVE_IMU, SHUTTER_SCALE};

/// Number of int32 values in the metadata array.
pub const METADATA_VALUES: usize = 18;

// Array indices, as the agent lays them out.  The last element (17) is
// reserved and carries no named field.
const IDX_CAMERA_ID: usize = 0;
const IDX_TIMESTAMP_SEC: usize = 1;
const IDX_TIMESTAMP_NANO: usize = 2;
const IDX_SHUTTER: usize = 3;
const IDX_GAIN: usize = 4;
const IDX_FILTER: usize = 5;
const IDX_ROLL: usize = 6;
const IDX_PITCH: usize = 7;
const IDX_YAW: usize = 8;
const IDX_LATITUDE: usize = 9;
const IDX_LONGITUDE: usize = 10;
const IDX_ALTITUDE: usize = 11;
const IDX_WHITEBAL_R: usize = 12;
const IDX_WHITEBAL_B: usize = 13;
const IDX_FOCUS: usize = 14;
const IDX_ZOOM: usize = 15;
const IDX_IRIS: usize = 16;

/// Camera-info group (`META_SAVE_CAM`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraMeta {
    pub camera_id: i32,
    /// Seconds since the epoch, with the nanosecond part folded in.
    pub timestamp: f64,
    /// Shutter time in seconds.
    pub shutter: f64,
    pub gain: i32,
    pub filter: i32,
    pub whitebal_r: i32,
    pub whitebal_b: i32,
    // HRC-specific raw values
    pub focus: i32,
    pub zoom: i32,
    pub iris: i32,
}

impl CameraMeta {
    /// The capture timestamp as UTC wall-clock time.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis((self.timestamp * 1000.0) as i64)
    }
}

/// IMU orientation group (`META_SAVE_IMU`), degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImuMeta {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// GPS position group (`META_SAVE_GPS`), degrees and metres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsMeta {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Decoded image metadata.  Each group is present only when the agent set
/// the corresponding save flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageMetadata {
    pub camera: Option<CameraMeta>,
    pub imu: Option<ImuMeta>,
    pub gps: Option<GpsMeta>,
}

impl ImageMetadata {
    /// Decode from the raw 18-int array and the save-flags word.
    pub fn decode(values: &[i32; METADATA_VALUES], flags: i32) -> ImageMetadata {
        let camera = (flags & META_SAVE_CAM != 0).then(|| CameraMeta {
            camera_id: values[IDX_CAMERA_ID],
            timestamp: values[IDX_TIMESTAMP_SEC] as f64
                + values[IDX_TIMESTAMP_NANO] as f64 / 1e9,
            shutter: values[IDX_SHUTTER] as f64 / SHUTTER_SCALE,
            gain: values[IDX_GAIN],
            filter: values[IDX_FILTER],
            whitebal_r: values[IDX_WHITEBAL_R],
            whitebal_b: values[IDX_WHITEBAL_B],
            focus: values[IDX_FOCUS],
            zoom: values[IDX_ZOOM],
            iris: values[IDX_IRIS],
        });
        let imu = (flags & META_SAVE_IMU != 0).then(|| ImuMeta {
            roll: values[IDX_ROLL] as f64 / ANG_SCALE_FINE,
            pitch: values[IDX_PITCH] as f64 / ANG_SCALE_FINE,
            yaw: values[IDX_YAW] as f64 / ANG_SCALE_FINE,
        });
        let gps = (flags & META_SAVE_GPS != 0).then(|| GpsMeta {
            latitude: values[IDX_LATITUDE] as f64 / ANG_SCALE_FINE,
            longitude: values[IDX_LONGITUDE] as f64 / ANG_SCALE_FINE,
            altitude: values[IDX_ALTITUDE] as f64 / DIST_SCALE,
        });
        ImageMetadata { camera, imu, gps }
    }

    /// Decode from a raw response payload (18 little-endian int32s).
    pub fn from_payload(data: &[u8], flags: i32) -> Result<ImageMetadata> {
        if data.len() != METADATA_VALUES * 4 {
            return Err(AgentError::BadResponse(format!(
                "metadata payload is {} bytes, expected {}",
                data.len(),
                METADATA_VALUES * 4
            )));
        }
        let mut values = [0i32; METADATA_VALUES];
        for (i, v) in values.iter_mut().enumerate() {
            *v = LE::read_i32(&data[i * 4..i * 4 + 4]);
        }
        Ok(ImageMetadata::decode(&values, flags))
    }
}
