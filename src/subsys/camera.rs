//! Camera subsystem client, shared by PanCam and AeroCam.
//!
//! Both subsystems expose the same command set (PanCam adds `GetLastImage`);
//! a [`CameraClient`] is bound to one of them at construction.  On top of the
//! raw feature opcodes it provides the typed accessor described in
//! [`crate::feature`]: integer, paired and absolute features plus the
//! manual/auto/once/extern mode pair, with the feature's kind checked locally
//! before anything is sent.
//!
//! The per-camera configuration table is fetched once and cached; call
//! [`CameraClient::invalidate_config`] to force a refetch.

use std::collections::HashMap;

use log::warn;
use serde::Serialize;

use crate::error::{AgentError, Result};
use crate::feature::{float_as_int, int_as_float, DiscardMode, Feature, FeatureKind, FeatureMode, FeatureValue};
use crate::image::{ImageFormat, ImageFrame};
use crate::metadata::ImageMetadata;
use crate::proto::{CamCmd, Subsystem};
use crate::transport::{Response, Transport};

/// Filter-set id for a filter-set number, for descriptor rows that omit the
/// explicit id column.
pub fn filter_set_name(num: i32) -> &'static str {
    match num {
        1 => "AFW01",
        2 => "AFW02",
        3 => "AFW03",
        4 => "AFW04",
        5 => "AFW05",
        _ => "NONE",
    }
}

/// One row of the camera configuration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraInfo {
    pub camera_id: i32,
    pub name: String,
    pub class: String,
    pub unique_name: String,
    pub driver: String,
    pub model: String,
    pub guid: String,
    pub desc: String,
    /// Explicit filter-set id when the row carries one; otherwise derive it
    /// from the filter-set number via [`filter_set_name`].
    pub filter_set_id: Option<String>,
}

impl CameraInfo {
    /// Parse one tab-separated descriptor line.
    fn parse(line: &str) -> Result<CameraInfo> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 8 {
            return Err(AgentError::BadResponse(format!(
                "camera descriptor has {} fields, expected at least 8",
                fields.len()
            )));
        }
        let camera_id = fields[0].trim().parse::<i32>().map_err(|_| {
            AgentError::BadResponse(format!("bad camera id `{}` in descriptor", fields[0]))
        })?;
        let mut desc = fields[7].to_string();
        if desc.starts_with('"') && desc.ends_with('"') && desc.len() >= 2 {
            desc = desc[1..desc.len() - 1].to_string();
        }
        Ok(CameraInfo {
            camera_id,
            name: fields[1].to_string(),
            class: fields[2].to_string(),
            unique_name: fields[3].to_string(),
            driver: fields[4].to_string(),
            model: fields[5].to_string(),
            guid: fields[6].to_string(),
            desc,
            filter_set_id: fields.get(8).map(|s| s.to_string()),
        })
    }
}

/// Filter wheel state: current filter plus its optical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterInfo {
    pub filter: i32,
    /// Centre wavelength in nm.
    pub center_nm: i32,
    /// Bandwidth in nm.
    pub bandwidth_nm: i32,
    /// Filter-set number fitted to this camera.
    pub filter_set: i32,
}

/// Parse the configuration payload: ASCII text, one camera per line.
fn parse_config(data: &[u8]) -> Result<HashMap<i32, CameraInfo>> {
    let text = String::from_utf8_lossy(data);
    let mut config = HashMap::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let info = CameraInfo::parse(line)?;
        config.insert(info.camera_id, info);
    }
    Ok(config)
}

/// Typed client for one of the two camera subsystems.
#[derive(Debug)]
pub struct CameraClient {
    subsystem: Subsystem,
    config: Option<HashMap<i32, CameraInfo>>,
}

impl CameraClient {
    /// Client for the mast-mounted PanCam (LWAC, RWAC, HRC).
    pub fn pancam() -> CameraClient {
        CameraClient {
            subsystem: Subsystem::PanCam,
            config: None,
        }
    }

    /// Client for the aerobot's multispectral camera.
    pub fn aerocam() -> CameraClient {
        CameraClient {
            subsystem: Subsystem::AeroCam,
            config: None,
        }
    }

    pub fn subsystem(&self) -> Subsystem {
        self.subsystem
    }

    fn call(&self, conn: &mut impl Transport, cmd: CamCmd, args: [i32; 4]) -> Result<Response> {
        conn.command_response(self.subsystem, cmd as u16, args)?.check()
    }

    // ── Image capture ─────────────────────────────────────────────────────────

    /// Capture a frame.  `flags` combines the `META_SAVE_*` bits with
    /// `IMAGE_AUTOEXPOSE`, `IMAGE_PREVIOUS` and `IMAGE_SYNC`.
    pub fn get_image(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        format: ImageFormat,
        flags: i32,
    ) -> Result<ImageFrame> {
        let resp = self.call(conn, CamCmd::GetImage, [camera_id, format.code(), flags, 0])?;
        let [width, height, depth, image_bytes] = resp.vals;
        if image_bytes as usize != resp.data.len() {
            warn!(
                "camera {camera_id}: payload is {} bytes but agent reported {image_bytes}",
                resp.data.len()
            );
        }
        Ok(ImageFrame {
            width: width as u32,
            height: height as u32,
            depth: depth as u32,
            format,
            data: resp.data,
        })
    }

    /// Drop frames before the next capture.  Returns the two frame counters
    /// the agent reports in `val1`/`val2`.
    pub fn discard_frames(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        nframes: i32,
        mode: DiscardMode,
    ) -> Result<(i32, i32)> {
        let resp = self.call(
            conn,
            CamCmd::DiscardFrames,
            [camera_id, nframes, mode as i32, 0],
        )?;
        Ok((resp.vals[0], resp.vals[1]))
    }

    // ── Feature access ────────────────────────────────────────────────────────

    /// Get a feature through the accessor kind its id declares.
    pub fn get_feature(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
    ) -> Result<FeatureValue> {
        match feature.kind() {
            FeatureKind::Int => Ok(FeatureValue::Int(
                self.get_feature_raw(conn, camera_id, feature)?,
            )),
            FeatureKind::Pair => {
                let (a, b) = self.get_feature_pair(conn, camera_id, feature)?;
                Ok(FeatureValue::Pair(a, b))
            }
            FeatureKind::Abs => Ok(FeatureValue::Abs(
                self.get_abs_feature(conn, camera_id, feature)?,
            )),
        }
    }

    /// Set a feature.  The value's kind must match the feature's kind; a
    /// mismatch fails locally without touching the wire.
    pub fn set_feature(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
        value: FeatureValue,
    ) -> Result<()> {
        if value.kind() != feature.kind() {
            return Err(AgentError::FeatureKind {
                feature,
                kind: value.kind_name(),
            });
        }
        match value {
            FeatureValue::Int(v) => self.set_feature_raw(conn, camera_id, feature, v, 0),
            FeatureValue::Pair(a, b) => self.set_feature_raw(conn, camera_id, feature, a, b),
            FeatureValue::Abs(v) => self.set_abs_feature(conn, camera_id, feature, v),
        }
    }

    /// Integer feature read (`val1`).
    pub fn get_feature_raw(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
    ) -> Result<i32> {
        let resp = self.call(
            conn,
            CamCmd::GetFeatureValue,
            [camera_id, feature.code(), 0, 0],
        )?;
        Ok(resp.vals[0])
    }

    /// Paired feature read (`val1`, `val2`).
    pub fn get_feature_pair(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
    ) -> Result<(i32, i32)> {
        let resp = self.call(
            conn,
            CamCmd::GetFeatureValue,
            [camera_id, feature.code(), 0, 0],
        )?;
        Ok((resp.vals[0], resp.vals[1]))
    }

    /// Integer feature write; paired features pass the second value in `v2`.
    pub fn set_feature_raw(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
        v: i32,
        v2: i32,
    ) -> Result<()> {
        self.call(
            conn,
            CamCmd::SetFeatureValue,
            [camera_id, feature.code(), v, v2],
        )?;
        Ok(())
    }

    /// Absolute (float) feature read: the wire integer is the IEEE-754
    /// binary32 bit pattern.
    pub fn get_abs_feature(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
    ) -> Result<f32> {
        let resp = self.call(
            conn,
            CamCmd::GetFeatureAbsValue,
            [camera_id, feature.code(), 0, 0],
        )?;
        Ok(int_as_float(resp.vals[0]))
    }

    /// Absolute (float) feature write.
    pub fn set_abs_feature(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
        value: f32,
    ) -> Result<()> {
        self.call(
            conn,
            CamCmd::SetFeatureAbsValue,
            [camera_id, feature.code(), float_as_int(value), 0],
        )?;
        Ok(())
    }

    pub fn get_feature_mode(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
    ) -> Result<FeatureMode> {
        let resp = self.call(
            conn,
            CamCmd::GetFeatureMode,
            [camera_id, feature.code(), 0, 0],
        )?;
        FeatureMode::from_i32(resp.vals[0]).ok_or_else(|| {
            AgentError::BadResponse(format!("unknown feature mode {}", resp.vals[0]))
        })
    }

    pub fn set_feature_mode(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        feature: Feature,
        mode: FeatureMode,
    ) -> Result<()> {
        self.call(
            conn,
            CamCmd::SetFeatureMode,
            [camera_id, feature.code(), mode as i32, 0],
        )?;
        Ok(())
    }

    // ── Composite features ────────────────────────────────────────────────────

    /// Read the agent-side ROI rectangle (x, y, width, height).  Four RPCs;
    /// the first failure aborts.
    pub fn get_roi(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
    ) -> Result<(i32, i32, i32, i32)> {
        Ok((
            self.get_feature_raw(conn, camera_id, Feature::RoiX)?,
            self.get_feature_raw(conn, camera_id, Feature::RoiY)?,
            self.get_feature_raw(conn, camera_id, Feature::RoiWidth)?,
            self.get_feature_raw(conn, camera_id, Feature::RoiHeight)?,
        ))
    }

    pub fn set_roi(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        roi: (i32, i32, i32, i32),
    ) -> Result<()> {
        self.set_feature_raw(conn, camera_id, Feature::RoiX, roi.0, 0)?;
        self.set_feature_raw(conn, camera_id, Feature::RoiY, roi.1, 0)?;
        self.set_feature_raw(conn, camera_id, Feature::RoiWidth, roi.2, 0)?;
        self.set_feature_raw(conn, camera_id, Feature::RoiHeight, roi.3, 0)
    }

    /// Read the on-camera metering region (left, top, right, bottom).
    pub fn get_metering_region(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
    ) -> Result<(i32, i32, i32, i32)> {
        Ok((
            self.get_feature_raw(conn, camera_id, Feature::RegLeft)?,
            self.get_feature_raw(conn, camera_id, Feature::RegTop)?,
            self.get_feature_raw(conn, camera_id, Feature::RegRight)?,
            self.get_feature_raw(conn, camera_id, Feature::RegBottom)?,
        ))
    }

    pub fn set_metering_region(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        region: (i32, i32, i32, i32),
    ) -> Result<()> {
        self.set_feature_raw(conn, camera_id, Feature::RegLeft, region.0, 0)?;
        self.set_feature_raw(conn, camera_id, Feature::RegTop, region.1, 0)?;
        self.set_feature_raw(conn, camera_id, Feature::RegRight, region.2, 0)?;
        self.set_feature_raw(conn, camera_id, Feature::RegBottom, region.3, 0)
    }

    // ── Image format ──────────────────────────────────────────────────────────

    pub fn set_image_format(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
        format: ImageFormat,
    ) -> Result<()> {
        self.call(conn, CamCmd::SetImageFormat, [camera_id, format.code(), 0, 0])?;
        Ok(())
    }

    pub fn get_image_format(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
    ) -> Result<ImageFormat> {
        let resp = self.call(conn, CamCmd::GetImageFormat, [camera_id, 0, 0, 0])?;
        ImageFormat::from_i32(resp.vals[0]).ok_or_else(|| {
            AgentError::BadResponse(format!("unknown image format {}", resp.vals[0]))
        })
    }

    // ── Filter wheel ──────────────────────────────────────────────────────────

    pub fn set_filter(&self, conn: &mut impl Transport, camera_id: i32, filter: i32) -> Result<()> {
        self.call(conn, CamCmd::SetFilter, [camera_id, filter, 0, 0])?;
        Ok(())
    }

    pub fn get_filter(&self, conn: &mut impl Transport, camera_id: i32) -> Result<i32> {
        let resp = self.call(conn, CamCmd::GetFilter, [camera_id, 0, 0, 0])?;
        Ok(resp.vals[0])
    }

    /// Full filter readout: number, centre wavelength, bandwidth, set number.
    pub fn get_filter_info(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
    ) -> Result<FilterInfo> {
        let resp = self.call(conn, CamCmd::GetFilter, [camera_id, 0, 0, 0])?;
        Ok(FilterInfo {
            filter: resp.vals[0],
            center_nm: resp.vals[1],
            bandwidth_nm: resp.vals[2],
            filter_set: resp.vals[3],
        })
    }

    /// Park the filter wheel.
    pub fn stow_filters(&self, conn: &mut impl Transport, camera_id: i32) -> Result<()> {
        self.call(conn, CamCmd::StowFilters, [camera_id, 0, 0, 0])?;
        Ok(())
    }

    // ── Configuration & metadata ──────────────────────────────────────────────

    /// The camera configuration table, fetched once and cached.
    pub fn get_config(
        &mut self,
        conn: &mut impl Transport,
    ) -> Result<&HashMap<i32, CameraInfo>> {
        let config = match self.config.take() {
            Some(c) => c,
            None => {
                let resp = self.call(conn, CamCmd::GetConfig, [0; 4])?;
                parse_config(&resp.data)?
            }
        };
        Ok(self.config.insert(config))
    }

    /// Drop the cached configuration so the next access refetches it.
    pub fn invalidate_config(&mut self) {
        self.config = None;
    }

    /// Descriptor for one camera, if the agent lists it.
    pub fn camera_info(
        &mut self,
        conn: &mut impl Transport,
        camera_id: i32,
    ) -> Result<Option<&CameraInfo>> {
        Ok(self.get_config(conn)?.get(&camera_id))
    }

    /// Metadata for the most recent capture.  The save-flags word arrives in
    /// `val2` and selects which groups are populated.
    pub fn get_image_metadata(
        &self,
        conn: &mut impl Transport,
        camera_id: i32,
    ) -> Result<ImageMetadata> {
        let resp = self.call(conn, CamCmd::GetImageMetadata, [camera_id, 0, 0, 0])?;
        ImageMetadata::from_payload(&resp.data, resp.vals[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{Status, CAMERA_HRC, CAMERA_WACL, META_SAVE_CAM, META_SAVE_GPS};
    use crate::transport::testing::ScriptedTransport;

    #[test]
    fn get_image_populates_frame_from_vals_and_payload() {
        let pixels = vec![0u8, 1, 2, 3, 4, 5];
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply_data(
            [3, 2, 1, 6],
            pixels.clone(),
        )]);
        let cam = CameraClient::pancam();
        let frame = cam
            .get_image(&mut t, CAMERA_WACL, ImageFormat::Mono8, META_SAVE_CAM)
            .unwrap();
        assert_eq!((frame.width, frame.height, frame.depth), (3, 2, 1));
        assert_eq!(frame.format, ImageFormat::Mono8);
        assert_eq!(frame.data, pixels);
        assert_eq!(
            t.sent,
            vec![(
                Subsystem::PanCam,
                CamCmd::GetImage as u16,
                [CAMERA_WACL, ImageFormat::Mono8.code(), META_SAVE_CAM, 0]
            )]
        );
    }

    #[test]
    fn aerocam_addresses_its_own_subsystem() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply(0, [0; 4])]);
        CameraClient::aerocam().set_filter(&mut t, 0, 2).unwrap();
        assert_eq!(t.sent[0].0, Subsystem::AeroCam);
    }

    #[test]
    fn error_status_discards_payload() {
        let mut t = ScriptedTransport::new(vec![Response {
            subsystem: Subsystem::PanCam as u16,
            status: Status::BadParam as u16,
            vals: [9, 9, 9, 9],
            data: b"not an image".to_vec(),
        }]);
        let cam = CameraClient::pancam();
        let err = cam
            .get_image(&mut t, 7, ImageFormat::Rgb8, 0)
            .unwrap_err();
        assert_eq!(err.status(), Some(Status::BadParam));
    }

    #[test]
    fn abs_feature_set_sends_exact_bit_pattern() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply(0, [0; 4])]);
        let cam = CameraClient::pancam();
        let third = 1.0f32 / 3.0;
        cam.set_abs_feature(&mut t, CAMERA_WACL, Feature::Shutter, third)
            .unwrap();
        let sent_arg = t.sent[0].2[2];
        assert_eq!(sent_arg, third.to_bits() as i32);
    }

    #[test]
    fn abs_feature_round_trips_through_wire_integer() {
        let third = 1.0f32 / 3.0;
        let wire = float_as_int(third);
        let mut t = ScriptedTransport::new(vec![
            ScriptedTransport::reply(0, [0; 4]),
            ScriptedTransport::reply(0, [wire, 0, 0, 0]),
        ]);
        let cam = CameraClient::pancam();
        cam.set_abs_feature(&mut t, CAMERA_WACL, Feature::Shutter, third)
            .unwrap();
        let back = cam.get_abs_feature(&mut t, CAMERA_WACL, Feature::Shutter).unwrap();
        assert_eq!(back.to_bits(), third.to_bits());
    }

    #[test]
    fn typed_accessor_dispatches_on_kind() {
        let mut t = ScriptedTransport::new(vec![
            ScriptedTransport::reply(0, [64, 80, 0, 0]),
            ScriptedTransport::reply(0, [float_as_int(0.02), 0, 0, 0]),
        ]);
        let cam = CameraClient::pancam();
        let wb = cam.get_feature(&mut t, CAMERA_HRC, Feature::WhiteBalance).unwrap();
        assert_eq!(wb, FeatureValue::Pair(64, 80));
        let shutter = cam.get_feature(&mut t, CAMERA_HRC, Feature::Shutter).unwrap();
        assert_eq!(shutter, FeatureValue::Abs(0.02));
        assert_eq!(t.sent[0].1, CamCmd::GetFeatureValue as u16);
        assert_eq!(t.sent[1].1, CamCmd::GetFeatureAbsValue as u16);
    }

    #[test]
    fn kind_mismatch_fails_before_sending() {
        let mut t = ScriptedTransport::new(vec![]);
        let cam = CameraClient::pancam();
        let err = cam
            .set_feature(&mut t, CAMERA_WACL, Feature::Shutter, FeatureValue::Int(5))
            .unwrap_err();
        assert!(matches!(err, AgentError::FeatureKind { .. }));
        assert!(t.sent.is_empty());
    }

    #[test]
    fn feature_mode_round_trip() {
        let mut t = ScriptedTransport::new(vec![
            ScriptedTransport::reply(0, [0; 4]),
            ScriptedTransport::reply(0, [FeatureMode::Auto as i32, 0, 0, 0]),
        ]);
        let cam = CameraClient::pancam();
        cam.set_feature_mode(&mut t, CAMERA_WACL, Feature::Gain, FeatureMode::Auto)
            .unwrap();
        let mode = cam.get_feature_mode(&mut t, CAMERA_WACL, Feature::Gain).unwrap();
        assert_eq!(mode, FeatureMode::Auto);
        assert_eq!(t.sent[0].2, [CAMERA_WACL, Feature::Gain.code(), 1, 0]);
    }

    #[test]
    fn filter_info_maps_all_four_vals() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply(0, [3, 670, 40, 2])]);
        let cam = CameraClient::pancam();
        let info = cam.get_filter_info(&mut t, CAMERA_WACL).unwrap();
        assert_eq!(
            info,
            FilterInfo { filter: 3, center_nm: 670, bandwidth_nm: 40, filter_set: 2 }
        );
    }

    const CONFIG_TEXT: &str = "0\tLWAC\tWAC\tcam-lwac\tgige\tGC1380\t0xdeadbeef\t\"Wide-angle camera (left)\"\n\
                               1\tRWAC\tWAC\tcam-rwac\tgige\tGC1380\t0xfeedface\tWide-angle camera (right)\tAFW02\n\
                               \n\
                               2\tHRC\tHRC\tcam-hrc\tgige\tGC2450\t0xcafebabe\tHigh resolution camera\n";

    #[test]
    fn config_parses_both_row_forms_and_quoting() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply_data(
            [0; 4],
            CONFIG_TEXT.as_bytes().to_vec(),
        )]);
        let mut cam = CameraClient::pancam();
        let config = cam.get_config(&mut t).unwrap();
        assert_eq!(config.len(), 3);
        let lwac = &config[&0];
        assert_eq!(lwac.name, "LWAC");
        assert_eq!(lwac.desc, "Wide-angle camera (left)"); // quotes stripped
        assert_eq!(lwac.filter_set_id, None);
        assert_eq!(config[&1].filter_set_id.as_deref(), Some("AFW02"));
        assert_eq!(config[&2].model, "GC2450");
    }

    #[test]
    fn config_is_cached_until_invalidated() {
        let payload = CONFIG_TEXT.as_bytes().to_vec();
        let mut t = ScriptedTransport::new(vec![
            ScriptedTransport::reply_data([0; 4], payload.clone()),
            ScriptedTransport::reply_data([0; 4], payload),
        ]);
        let mut cam = CameraClient::pancam();
        cam.get_config(&mut t).unwrap();
        cam.get_config(&mut t).unwrap();
        assert_eq!(t.sent.len(), 1, "second access must hit the cache");

        cam.invalidate_config();
        cam.get_config(&mut t).unwrap();
        assert_eq!(t.sent.len(), 2);
    }

    #[test]
    fn metadata_flags_come_from_val2() {
        let mut payload = Vec::new();
        for i in 0..18i32 {
            payload.extend_from_slice(&i.to_le_bytes());
        }
        let flags = META_SAVE_CAM | META_SAVE_GPS;
        let mut t =
            ScriptedTransport::new(vec![ScriptedTransport::reply_data([0, flags, 0, 0], payload)]);
        let cam = CameraClient::pancam();
        let md = cam.get_image_metadata(&mut t, CAMERA_WACL).unwrap();
        assert!(md.camera.is_some());
        assert!(md.gps.is_some());
        assert!(md.imu.is_none());
    }

    #[test]
    fn discard_frames_returns_agent_counters() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply(0, [5, 2, 0, 0])]);
        let cam = CameraClient::pancam();
        let counters = cam
            .discard_frames(&mut t, CAMERA_WACL, 5, DiscardMode::Shutter)
            .unwrap();
        assert_eq!(counters, (5, 2));
        assert_eq!(t.sent[0].2, [CAMERA_WACL, 5, DiscardMode::Shutter as i32, 0]);
    }

    #[test]
    fn roi_composite_issues_four_calls_in_order() {
        let mut t = ScriptedTransport::new(vec![
            ScriptedTransport::reply(0, [0; 4]),
            ScriptedTransport::reply(0, [0; 4]),
            ScriptedTransport::reply(0, [0; 4]),
            ScriptedTransport::reply(0, [0; 4]),
        ]);
        let cam = CameraClient::pancam();
        cam.set_roi(&mut t, CAMERA_WACL, (10, 20, 320, 240)).unwrap();
        let codes: Vec<i32> = t.sent.iter().map(|s| s.2[1]).collect();
        assert_eq!(
            codes,
            vec![
                Feature::RoiX.code(),
                Feature::RoiY.code(),
                Feature::RoiWidth.code(),
                Feature::RoiHeight.code()
            ]
        );
        assert_eq!(t.sent[3].2[2], 240);
    }
}
