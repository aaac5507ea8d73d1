//! End-to-end test of the real TCP transport against a scripted agent.
//!
//! The fake agent deliberately fragments its responses into small writes so
//! the client's partial-read accumulation is exercised over a real socket.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use ra_client::proto::packet::{CommandPacket, ResponseHeader};
use ra_client::proto::{
    CamCmd, PtuCmd, Status, Subsystem, SystemCmd, META_SAVE_CAM, PKT_LEN,
};
use ra_client::subsys::{camera::CameraClient, mast, system};
use ra_client::{AgentConnection, AgentError, ImageFormat, Transport};

fn read_command(stream: &mut TcpStream) -> Option<CommandPacket> {
    let mut buf = [0u8; PKT_LEN];
    let mut filled = 0;
    while filled < PKT_LEN {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => return None,
            Ok(n) => filled += n,
            Err(_) => return None,
        }
    }
    Some(CommandPacket::decode(&buf))
}

/// Write a response in deliberately small pieces.
fn write_fragmented(stream: &mut TcpStream, status: Status, vals: [i32; 4], payload: &[u8]) {
    let hdr = ResponseHeader {
        subsystem: Subsystem::System as u16,
        status: status as u16,
        vals,
        data_bytes: payload.len() as u32,
    };
    let mut wire = hdr.encode().to_vec();
    wire.extend_from_slice(payload);
    for piece in wire.chunks(7) {
        stream.write_all(piece).unwrap();
        stream.flush().unwrap();
    }
}

/// A minimal agent: answers the handshake, one image capture, one PTU
/// round trip, rejects one feature request, then acknowledges disconnect.
fn scripted_agent(listener: TcpListener, image: Vec<u8>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut commanded_pan = 0i32;
        while let Some(cmd) = read_command(&mut stream) {
            match (cmd.subsystem, cmd.command) {
                (Subsystem::System, c) if c == SystemCmd::Connect as u16 => {
                    write_fragmented(&mut stream, Status::Ok, [3, 2, 0, 0], &[]);
                }
                (Subsystem::System, c) if c == SystemCmd::Disconnect as u16 => {
                    write_fragmented(&mut stream, Status::Ok, [0; 4], &[]);
                    break;
                }
                (Subsystem::PanCam, c) if c == CamCmd::GetImage as u16 => {
                    write_fragmented(
                        &mut stream,
                        Status::Ok,
                        [4, 2, 1, image.len() as i32],
                        &image,
                    );
                }
                (Subsystem::PanCam, c) if c == CamCmd::GetFeatureValue as u16 => {
                    // Reject with a payload the client must never surface.
                    write_fragmented(&mut stream, Status::BadParam, [0; 4], b"bogus");
                }
                (Subsystem::Mast, c) if c == PtuCmd::SetOneJoint as u16 => {
                    commanded_pan = cmd.args[1];
                    write_fragmented(&mut stream, Status::Ok, [0; 4], &[]);
                }
                (Subsystem::Mast, c) if c == PtuCmd::GetJoints as u16 => {
                    write_fragmented(&mut stream, Status::Ok, [commanded_pan, 0, 0, 0], &[]);
                }
                _ => {
                    write_fragmented(&mut stream, Status::BadFunction, [0; 4], &[]);
                }
            }
        }
    })
}

#[test]
fn full_session_over_real_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let image: Vec<u8> = (0..8).collect();
    let agent = scripted_agent(listener, image.clone());

    let mut conn = AgentConnection::new(Some(&addr.to_string())).unwrap();
    let version = system::connect(&mut conn, None).unwrap();
    assert_eq!(version, (3, 2));

    // Payload-bearing response, reassembled from 7-byte fragments.
    let cam = CameraClient::pancam();
    let frame = cam
        .get_image(&mut conn, 0, ImageFormat::Mono8, META_SAVE_CAM)
        .unwrap();
    assert_eq!((frame.width, frame.height, frame.depth), (4, 2, 1));
    assert_eq!(frame.data, image);

    // Protocol error: typed status, payload discarded, connection usable.
    let err = cam
        .get_feature_raw(&mut conn, 0, ra_client::Feature::Gain)
        .unwrap_err();
    assert_eq!(err.status(), Some(Status::BadParam));

    // Fixed-point round trip through the agent's echo.
    mast::set_pan(&mut conn, 10.5).unwrap();
    let (pan, _tilt) = mast::get_pan_tilt(&mut conn, ra_client::proto::JointSelect::Measured)
        .unwrap();
    assert!((pan - 10.5).abs() <= 1e-6);

    system::disconnect(&mut conn).unwrap();
    assert!(!conn.is_connected());

    // After close every call fails locally.
    match mast::stow(&mut conn) {
        Err(AgentError::NotConnected) => {}
        other => panic!("expected NotConnected, got {other:?}"),
    }

    agent.join().unwrap();
}

#[test]
fn peer_close_mid_header_is_connection_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let agent = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        // Read the handshake command, send half a header, then hang up.
        let mut buf = [0u8; PKT_LEN];
        stream.read_exact(&mut buf).unwrap();
        stream.write_all(&[0u8; 10]).unwrap();
    });

    let mut conn = AgentConnection::new(Some(&addr.to_string())).unwrap();
    match system::connect(&mut conn, None) {
        Err(AgentError::ConnectionClosed) => {}
        other => panic!("expected ConnectionClosed, got {other:?}"),
    }
    agent.join().unwrap();
}

#[test]
fn reconnect_rules() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let agent = thread::spawn(move || {
        let (_stream, _) = listener.accept().unwrap();
        // Hold the socket open until the client is done.
        thread::park_timeout(std::time::Duration::from_millis(500));
    });

    let mut conn = AgentConnection::new(Some(&addr.to_string())).unwrap();
    conn.connect(None).unwrap();
    // Same address: no-op.  Different address while connected: refused.
    conn.connect(Some(&addr.to_string())).unwrap();
    match conn.connect(Some("127.0.0.1:1")) {
        Err(AgentError::AddressLocked) => {}
        other => panic!("expected AddressLocked, got {other:?}"),
    }
    conn.close();
    conn.close(); // idempotent
    agent.join().unwrap();
}
