//! Error types for the rover agent client.
//!
//! Two disjoint failure classes cross the public API:
//!
//! - transport failures (`Io`, `ConnectionClosed`, `NotConnected`) are fatal
//!   to the connection — the caller must reconnect;
//! - agent failures (`Agent`) are a non-zero status in a well-formed response
//!   — the connection stays usable for subsequent calls.

use thiserror::Error;

use crate::feature::Feature;
use crate::proto::{status_text, Status};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    /// A zero-length read: the agent closed the connection mid-packet.
    #[error("agent connection closed by peer")]
    ConnectionClosed,

    #[error("not connected to agent")]
    NotConnected,

    #[error("cannot change agent address while connected")]
    AddressLocked,

    #[error("bad agent address `{0}`")]
    Address(String),

    /// Non-zero status in an agent response.
    #[error("agent status {status}: {}", status_text(*status))]
    Agent { status: u16 },

    /// A structurally invalid response (wrong payload shape for the command).
    #[error("malformed response: {0}")]
    BadResponse(String),

    #[error("feature {feature:?} does not take {kind} values")]
    FeatureKind {
        feature: Feature,
        kind: &'static str,
    },
}

impl AgentError {
    /// The typed status of an [`AgentError::Agent`], when the code is one the
    /// protocol defines.
    pub fn status(&self) -> Option<Status> {
        match self {
            AgentError::Agent { status } => Status::from_u16(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_error_carries_status_and_text() {
        let err = AgentError::Agent { status: 5 };
        assert_eq!(err.status(), Some(Status::BadParam));
        let msg = err.to_string();
        assert!(msg.contains("5"), "{msg}");
        assert!(msg.contains("bad subsystem function parameter"), "{msg}");
    }

    #[test]
    fn unknown_status_still_reported() {
        let err = AgentError::Agent { status: 42 };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("unknown status"));
    }
}
