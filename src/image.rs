//! Captured image frames.
//!
//! The transport has no knowledge of image semantics: a `GetImage` response
//! carries width, height, depth and byte count in `val1..val4` and the raw
//! pixels in the payload.  [`ImageFrame`] is the typed result handed to the
//! caller, who owns it exclusively.

use clap::ValueEnum;
use serde::Serialize;

/// Pixel formats the agent can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[repr(i32)]
pub enum ImageFormat {
    Rgb8 = 0,
    Yuv422 = 1,
    Mono8 = 2,
    Bayer8 = 3,
    Mono16 = 4,
    /// 12-bit mono, two pixels packed into three bytes.
    Mono12Packed = 5,
}

impl ImageFormat {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_i32(v: i32) -> Option<ImageFormat> {
        match v {
            0 => Some(ImageFormat::Rgb8),
            1 => Some(ImageFormat::Yuv422),
            2 => Some(ImageFormat::Mono8),
            3 => Some(ImageFormat::Bayer8),
            4 => Some(ImageFormat::Mono16),
            5 => Some(ImageFormat::Mono12Packed),
            _ => None,
        }
    }
}

/// One captured frame: descriptive integers from `val1..val4` plus the raw
/// pixel payload.  Layout within `data` is format-dependent and opaque here.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    pub width: u32,
    pub height: u32,
    /// Bytes per pixel as reported by the agent.
    pub depth: u32,
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

impl ImageFrame {
    /// `width * height * depth` — the byte count a full frame of these
    /// dimensions occupies.
    pub fn expected_bytes(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_codes() {
        assert_eq!(ImageFormat::Rgb8.code(), 0);
        assert_eq!(ImageFormat::Mono12Packed.code(), 5);
        assert_eq!(ImageFormat::from_i32(4), Some(ImageFormat::Mono16));
        assert_eq!(ImageFormat::from_i32(6), None);
    }

    #[test]
    fn expected_bytes() {
        let frame = ImageFrame {
            width: 1024,
            height: 768,
            depth: 3,
            format: ImageFormat::Rgb8,
            data: vec![],
        };
        assert_eq!(frame.expected_bytes(), 1024 * 768 * 3);
    }
}
