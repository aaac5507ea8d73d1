//! Blocking TCP transport to the rover agent.
//!
//! The protocol is strictly synchronous: one request, then exactly one
//! response, on a single connection.  There is no request id, no pipelining,
//! no multiplexing.  A second request must not be sent before the previous
//! response has been fully consumed; the exclusive `&mut self` on every call
//! encodes that.
//!
//! A stream socket may deliver fewer bytes than asked for, so both the
//! 32-byte header and the trailing payload are accumulated with a read loop.
//! A zero-length read anywhere in a packet means the agent closed the
//! connection and is reported as [`AgentError::ConnectionClosed`], distinct
//! from a protocol-level error status.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use log::{debug, info};

use crate::config::AgentAddr;
use crate::error::{AgentError, Result};
use crate::proto::packet::{CommandPacket, ResponseHeader};
use crate::proto::{Status, Subsystem, PKT_LEN};

/// A fully received response: decoded header plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub subsystem: u16,
    pub status: u16,
    pub vals: [i32; 4],
    pub data: Vec<u8>,
}

impl Response {
    /// Fail on a non-zero status.  The payload of a failed response is
    /// undefined and is dropped here so it can never be consumed.
    pub fn check(self) -> Result<Response> {
        if self.status == Status::Ok as u16 {
            Ok(self)
        } else {
            Err(AgentError::Agent { status: self.status })
        }
    }
}

/// The request/response primitive every subsystem client is built on.
///
/// [`AgentConnection`] is the TCP implementation; tests substitute scripted
/// implementations.
pub trait Transport {
    /// Establish the connection.  Reconnecting while connected is a no-op
    /// unless `addr` names a different agent, which fails.
    fn connect(&mut self, addr: Option<&str>) -> Result<()>;

    /// Release the socket.  Idempotent.
    fn close(&mut self);

    /// Serialize and write one command packet.  Does not wait for a reply.
    fn send_command(&mut self, subsystem: Subsystem, command: u16, args: [i32; 4]) -> Result<()>;

    /// Read exactly one response (header plus payload).
    fn receive_response(&mut self) -> Result<Response>;

    /// Send a command and read its response.
    fn command_response(
        &mut self,
        subsystem: Subsystem,
        command: u16,
        args: [i32; 4],
    ) -> Result<Response> {
        self.send_command(subsystem, command, args)?;
        self.receive_response()
    }
}

/// Blocking TCP connection to the agent.
///
/// The socket is released when the connection is dropped or closed; either
/// way every exit path gives the descriptor back.
#[derive(Debug)]
pub struct AgentConnection {
    addr: AgentAddr,
    timeout: Option<Duration>,
    stream: Option<TcpStream>,
}

impl AgentConnection {
    /// Create an unconnected handle.  `addr` resolution falls back to the
    /// `AGENT_ADDR` environment variable and then the built-in default.
    pub fn new(addr: Option<&str>) -> Result<AgentConnection> {
        Ok(AgentConnection {
            addr: AgentAddr::resolve(addr)?,
            timeout: None,
            stream: None,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// The address this connection targets.
    pub fn addr(&self) -> &AgentAddr {
        &self.addr
    }

    /// Optional socket-level read/write deadline.  Expiry surfaces as an IO
    /// error, which is fatal to the connection like any transport failure.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.timeout = timeout;
        if let Some(stream) = &self.stream {
            stream.set_read_timeout(timeout)?;
            stream.set_write_timeout(timeout)?;
        }
        Ok(())
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        self.stream.as_mut().ok_or(AgentError::NotConnected)
    }
}

impl Transport for AgentConnection {
    fn connect(&mut self, addr: Option<&str>) -> Result<()> {
        if self.stream.is_some() {
            match addr {
                Some(a) if AgentAddr::parse(a)? != self.addr => {
                    return Err(AgentError::AddressLocked)
                }
                _ => return Ok(()),
            }
        }
        if let Some(a) = addr {
            self.addr = AgentAddr::parse(a)?;
        }
        let stream = TcpStream::connect((self.addr.host.as_str(), self.addr.port))?;
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;
        info!("connected to agent at {}", self.addr);
        self.stream = Some(stream);
        Ok(())
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            info!("agent connection to {} closed", self.addr);
        }
    }

    fn send_command(&mut self, subsystem: Subsystem, command: u16, args: [i32; 4]) -> Result<()> {
        let pkt = CommandPacket::new(subsystem, command, args);
        debug!("send {subsystem:?} cmd {command} args {args:?}");
        self.stream()?.write_all(&pkt.encode())?;
        Ok(())
    }

    fn receive_response(&mut self) -> Result<Response> {
        let resp = read_response(self.stream()?)?;
        debug!(
            "recv status {} vals {:?} + {} payload bytes",
            resp.status,
            resp.vals,
            resp.data.len()
        );
        Ok(resp)
    }
}

/// Read one complete response from a stream: exactly 32 header bytes, then,
/// if the header announces a payload, exactly that many more.
pub fn read_response<R: Read>(r: &mut R) -> Result<Response> {
    let mut hdr = [0u8; PKT_LEN];
    read_full(r, &mut hdr)?;
    let header = ResponseHeader::decode(&hdr);
    let mut data = vec![0u8; header.data_bytes as usize];
    if !data.is_empty() {
        read_full(r, &mut data)?;
    }
    Ok(Response {
        subsystem: header.subsystem,
        status: header.status,
        vals: header.vals,
        data,
    })
}

/// Fill `buf` completely, accumulating short reads.  A zero-length read is
/// the peer closing the stream mid-packet.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => return Err(AgentError::ConnectionClosed),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

// ── Test support ──────────────────────────────────────────────────────────────
