//! Arm client: three rotational joints (base, shoulder, elbow).
//!
//! Mirrors the mast client with one more joint; same ×1,000,000 fixed-point
//! degree encoding.

use crate::error::Result;
use crate::proto::{ArmCmd, ArmJoint, JointSelect, Subsystem};
use crate::transport::Transport;

use super::{deg_to_wire, wire_to_deg};

/// Command all three joints in one move.
pub fn set_joints(
    conn: &mut impl Transport,
    base_deg: f64,
    shoulder_deg: f64,
    elbow_deg: f64,
) -> Result<()> {
    conn.command_response(
        Subsystem::Arm,
        ArmCmd::SetAllJoints as u16,
        [
            deg_to_wire(base_deg),
            deg_to_wire(shoulder_deg),
            deg_to_wire(elbow_deg),
            0,
        ],
    )?
    .check()?;
    Ok(())
}

/// Command a single joint.
pub fn set_joint(conn: &mut impl Transport, joint: ArmJoint, deg: f64) -> Result<()> {
    conn.command_response(
        Subsystem::Arm,
        ArmCmd::SetOneJoint as u16,
        [joint as i32, deg_to_wire(deg), 0, 0],
    )?
    .check()?;
    Ok(())
}

/// Drive the arm to its stowed position.
pub fn stow(conn: &mut impl Transport) -> Result<()> {
    conn.command_response(Subsystem::Arm, ArmCmd::Stow as u16, [0; 4])?
        .check()?;
    Ok(())
}

/// Read (base, shoulder, elbow) in degrees.
pub fn get_joints(conn: &mut impl Transport, how: JointSelect) -> Result<(f64, f64, f64)> {
    let resp = conn
        .command_response(Subsystem::Arm, ArmCmd::GetJoints as u16, [how as i32, 0, 0, 0])?
        .check()?;
    Ok((
        wire_to_deg(resp.vals[0]),
        wire_to_deg(resp.vals[1]),
        wire_to_deg(resp.vals[2]),
    ))
}
