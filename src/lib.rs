//! Client for the rover agent wire protocol.
//!
//! The onboard agent owns the hardware — PanCam cameras, mast pan-tilt unit,
//! arm, aerobot platform — and serves a fixed-format binary request/response
//! protocol over TCP.  This crate implements the client side: the packet
//! codec, a blocking transport with strict one-request-at-a-time semantics,
//! typed subsystem clients, the generic camera-feature accessor, and the
//! fixed-point metadata decoding.
//!
//! ```no_run
//! use ra_client::{subsys, AgentConnection, ImageFormat};
//! use ra_client::proto::{CAMERA_WACL, META_SAVE_CAM};
//!
//! # fn main() -> ra_client::Result<()> {
//! let mut conn = AgentConnection::new(None)?;
//! let (major, minor) = subsys::system::connect(&mut conn, None)?;
//! println!("agent protocol {major}.{minor}");
//!
//! let cam = ra_client::CameraClient::pancam();
//! let frame = cam.get_image(&mut conn, CAMERA_WACL, ImageFormat::Mono8, META_SAVE_CAM)?;
//! println!("{}x{} ({} bytes)", frame.width, frame.height, frame.len());
//!
//! subsys::system::disconnect(&mut conn)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod feature;
pub mod image;
pub mod metadata;
pub mod proto;
pub mod subsys;
pub mod transport;

pub use config::AgentAddr;
pub use error::{AgentError, Result};
pub use feature::{Feature, FeatureMode, FeatureValue};
pub use image::{ImageFormat, ImageFrame};
pub use metadata::ImageMetadata;
pub use proto::{Status, Subsystem};
pub use subsys::camera::CameraClient;
pub use transport::{AgentConnection, Response, Transport};
