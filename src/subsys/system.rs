//! System subsystem: connection handshake and agent lifecycle.

use log::warn;

use crate::error::Result;
use crate::proto::{Subsystem, SystemCmd, PROTOCOL_MINOR, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Open the transport and perform the `SYSTEM_CONNECT` handshake.
///
/// Returns the agent's protocol (major, minor).  A mismatch against the
/// compiled-in version is logged as a warning but is not fatal — the
/// connection proceeds.
pub fn connect(conn: &mut impl Transport, addr: Option<&str>) -> Result<(i32, i32)> {
    conn.connect(addr)?;
    let resp = conn
        .command_response(Subsystem::System, SystemCmd::Connect as u16, [0; 4])?
        .check()?;
    let (major, minor) = (resp.vals[0], resp.vals[1]);
    if major != PROTOCOL_VERSION || minor != PROTOCOL_MINOR {
        warn!(
            "protocol version mismatch: client {PROTOCOL_VERSION}.{PROTOCOL_MINOR}, \
             agent {major}.{minor}"
        );
    }
    Ok((major, minor))
}

/// Tell the agent we are leaving, then release the socket.
pub fn disconnect(conn: &mut impl Transport) -> Result<()> {
    conn.command_response(Subsystem::System, SystemCmd::Disconnect as u16, [0; 4])?
        .check()?;
    conn.close();
    Ok(())
}

/// Ask the agent process to shut down.
pub fn shutdown(conn: &mut impl Transport) -> Result<()> {
    conn.command_response(Subsystem::System, SystemCmd::Shutdown as u16, [0; 4])?
        .check()?;
    Ok(())
}

/// Query the agent's protocol version (`val1`).
pub fn get_version(conn: &mut impl Transport) -> Result<i32> {
    let resp = conn
        .command_response(Subsystem::System, SystemCmd::GetVersion as u16, [0; 4])?
        .check()?;
    Ok(resp.vals[0])
}
