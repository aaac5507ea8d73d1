//! Vicon motion-capture interface: an independent pan/tilt readout used to
//! cross-check the mast encoders.

use crate::error::Result;
use crate::proto::{Subsystem, ViconCmd};
use crate::transport::Transport;

use super::wire_to_deg;

/// Read the externally tracked (pan, tilt) in degrees.
pub fn get_pan_tilt(conn: &mut impl Transport) -> Result<(f64, f64)> {
    let resp = conn
        .command_response(Subsystem::Vicon, ViconCmd::GetPanTilt as u16, [0; 4])?
        .check()?;
    Ok((wire_to_deg(resp.vals[0]), wire_to_deg(resp.vals[1])))
}
