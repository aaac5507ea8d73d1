//! Fixed 32-byte packet header codec.
//!
//! Request and response share the same header shape:
//!
//! ```text
//! offset  field                          type
//! 0       ident (magic 0xB0AD1CEA)       u32
//! 4       subsystem                      u16
//! 6       command (req) / status (resp)  u16
//! 8..24   arg1..arg4 / val1..val4        i32 × 4
//! 24      reserved (always 0)            i32
//! 28      data_bytes (payload length)    u32
//! ```
//!
//! Commands never carry a payload (`data_bytes` is always 0 on the way out);
//! responses are followed by exactly `data_bytes` bytes of raw payload.
//! Everything is little-endian.

use byteorder::{ByteOrder, LittleEndian as LE};

use super::{Subsystem, IDENT, PKT_LEN};

/// A command header, client → agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPacket {
    pub subsystem: Subsystem,
    pub command: u16,
    pub args: [i32; 4],
}

impl CommandPacket {
    pub fn new(subsystem: Subsystem, command: u16, args: [i32; 4]) -> Self {
        CommandPacket { subsystem, command, args }
    }

    /// Serialize to the fixed 32-byte wire form.
    pub fn encode(&self) -> [u8; PKT_LEN] {
        let mut buf = [0u8; PKT_LEN];
        LE::write_u32(&mut buf[0..4], IDENT);
        LE::write_u16(&mut buf[4..6], self.subsystem as u16);
        LE::write_u16(&mut buf[6..8], self.command);
        for (i, arg) in self.args.iter().enumerate() {
            LE::write_i32(&mut buf[8 + i * 4..12 + i * 4], *arg);
        }
        // bytes 24..32: reserved and data_bytes stay zero
        buf
    }

    /// Decode a command header.  The agent does this; the client only needs it
    /// for tests and loopback tooling.
    pub fn decode(buf: &[u8; PKT_LEN]) -> CommandPacket {
        CommandPacket {
            subsystem: Subsystem::from_u16(LE::read_u16(&buf[4..6])).unwrap_or(Subsystem::None),
            command: LE::read_u16(&buf[6..8]),
            args: read_vals(buf),
        }
    }
}

/// A response header, agent → client.  `data_bytes` payload bytes follow on
/// the wire; the transport reads them separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub subsystem: u16,
    pub status: u16,
    pub vals: [i32; 4],
    pub data_bytes: u32,
}

impl ResponseHeader {
    /// Decode the fixed 32-byte header.  The ident field is not interpreted
    /// on the response path.
    pub fn decode(buf: &[u8; PKT_LEN]) -> ResponseHeader {
        ResponseHeader {
            subsystem: LE::read_u16(&buf[4..6]),
            status: LE::read_u16(&buf[6..8]),
            vals: read_vals(buf),
            data_bytes: LE::read_u32(&buf[28..32]),
        }
    }

    /// Serialize to wire form (used by tests and loopback agents).
    pub fn encode(&self) -> [u8; PKT_LEN] {
        let mut buf = [0u8; PKT_LEN];
        LE::write_u32(&mut buf[0..4], IDENT);
        LE::write_u16(&mut buf[4..6], self.subsystem);
        LE::write_u16(&mut buf[6..8], self.status);
        for (i, val) in self.vals.iter().enumerate() {
            LE::write_i32(&mut buf[8 + i * 4..12 + i * 4], *val);
        }
        LE::write_u32(&mut buf[28..32], self.data_bytes);
        buf
    }
}

fn read_vals(buf: &[u8; PKT_LEN]) -> [i32; 4] {
    let mut vals = [0i32; 4];
    for (i, val) in vals.iter_mut().enumerate() {
        *val = LE::read_i32(&buf[8 + i * 4..12 + i * 4]);
    }
    vals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{CamCmd, Status};

    #[test]
    fn command_wire_layout() {
        let pkt = CommandPacket::new(
            Subsystem::PanCam,
            CamCmd::GetImage as u16,
            [1, 2, -3, 0x0102_0304],
        );
        let buf = pkt.encode();
        // magic, little-endian
        assert_eq!(&buf[0..4], &[0xEA, 0x1C, 0xAD, 0xB0]);
        assert_eq!(&buf[4..6], &[2, 0]); // SUBSYS_PANCAM
        assert_eq!(&buf[6..8], &[1, 0]); // CAM_GET_IMAGE
        assert_eq!(&buf[8..12], &[1, 0, 0, 0]);
        assert_eq!(&buf[16..20], &(-3i32).to_le_bytes());
        assert_eq!(&buf[20..24], &[0x04, 0x03, 0x02, 0x01]);
        // reserved and data_bytes always zero on commands
        assert_eq!(&buf[24..32], &[0; 8]);
    }

    #[test]
    fn command_round_trip() {
        let pkt = CommandPacket::new(Subsystem::Mast, 4, [i32::MIN, i32::MAX, 0, 7]);
        assert_eq!(CommandPacket::decode(&pkt.encode()), pkt);
    }

    #[test]
    fn response_round_trip() {
        let hdr = ResponseHeader {
            subsystem: Subsystem::PanCam as u16,
            status: Status::Ok as u16,
            vals: [1024, 768, 1, 786_432],
            data_bytes: 786_432,
        };
        assert_eq!(ResponseHeader::decode(&hdr.encode()), hdr);
    }

    #[test]
    fn response_status_and_length_fields() {
        let hdr = ResponseHeader {
            subsystem: 2,
            status: 5,
            vals: [0; 4],
            data_bytes: 9,
        };
        let buf = hdr.encode();
        assert_eq!(&buf[6..8], &[5, 0]);
        assert_eq!(&buf[28..32], &[9, 0, 0, 0]);
    }
}
