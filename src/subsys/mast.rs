//! Mast pan-tilt unit client.
//!
//! Angles are degrees at the API and ×1,000,000 fixed-point integers on the
//! wire.

use crate::error::Result;
use crate::proto::{JointSelect, PtuCmd, PtuJoint, Subsystem};
use crate::transport::Transport;

use super::{deg_to_wire, wire_to_deg};

/// Command both joints in one move.
pub fn set_pan_tilt(conn: &mut impl Transport, pan_deg: f64, tilt_deg: f64) -> Result<()> {
    conn.command_response(
        Subsystem::Mast,
        PtuCmd::SetAllJoints as u16,
        [deg_to_wire(pan_deg), deg_to_wire(tilt_deg), 0, 0],
    )?
    .check()?;
    Ok(())
}

/// Command a single joint.
pub fn set_joint(conn: &mut impl Transport, joint: PtuJoint, deg: f64) -> Result<()> {
    conn.command_response(
        Subsystem::Mast,
        PtuCmd::SetOneJoint as u16,
        [joint as i32, deg_to_wire(deg), 0, 0],
    )?
    .check()?;
    Ok(())
}

pub fn set_pan(conn: &mut impl Transport, deg: f64) -> Result<()> {
    set_joint(conn, PtuJoint::Pan, deg)
}

pub fn set_tilt(conn: &mut impl Transport, deg: f64) -> Result<()> {
    set_joint(conn, PtuJoint::Tilt, deg)
}

/// Drive the PTU to its stowed position.
pub fn stow(conn: &mut impl Transport) -> Result<()> {
    conn.command_response(Subsystem::Mast, PtuCmd::Stow as u16, [0; 4])?
        .check()?;
    Ok(())
}

/// Read (pan, tilt) in degrees.  `how` selects the commanded, rounded or
/// measured reading.
pub fn get_pan_tilt(conn: &mut impl Transport, how: JointSelect) -> Result<(f64, f64)> {
    let resp = conn
        .command_response(Subsystem::Mast, PtuCmd::GetJoints as u16, [how as i32, 0, 0, 0])?
        .check()?;
    Ok((wire_to_deg(resp.vals[0]), wire_to_deg(resp.vals[1])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedTransport;

    #[test]
    fn set_pan_scales_to_wire_units() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply(0, [0; 4])]);
        set_pan(&mut t, 10.5).unwrap();
        assert_eq!(
            t.sent,
            vec![(Subsystem::Mast, 2, [PtuJoint::Pan as i32, 10_500_000, 0, 0])]
        );
    }

    #[test]
    fn set_then_get_round_trips_within_quantization() {
        let commanded = 10.5;
        let wire = deg_to_wire(commanded);
        let mut t = ScriptedTransport::new(vec![
            ScriptedTransport::reply(0, [0; 4]),
            ScriptedTransport::reply(0, [wire, 0, 0, 0]),
        ]);
        set_pan(&mut t, commanded).unwrap();
        let (pan, _tilt) = get_pan_tilt(&mut t, JointSelect::Measured).unwrap();
        assert!((pan - commanded).abs() <= 1e-6, "pan={pan}");
        assert_eq!(t.sent[1].2[0], JointSelect::Measured as i32);
    }

    #[test]
    fn set_pan_tilt_packs_both_joints() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply(0, [0; 4])]);
        set_pan_tilt(&mut t, -5.25, 30.0).unwrap();
        assert_eq!(t.sent[0].2, [-5_250_000, 30_000_000, 0, 0]);
    }

    #[test]
    fn stow_has_no_args() {
        let mut t = ScriptedTransport::new(vec![ScriptedTransport::reply(0, [0; 4])]);
        stow(&mut t).unwrap();
        assert_eq!(t.sent, vec![(Subsystem::Mast, 3, [0; 4])]);
    }
}
