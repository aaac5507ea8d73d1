//! Agent address resolution.
//!
//! The agent is reached at a `host:port` address.  Resolution order: an
//! explicit address string, then the `AGENT_ADDR` environment variable, then
//! the built-in default.  Host and port default independently, so `:9000`,
//! `192.168.1.20:` and a bare hostname are all valid.

use std::env;
use std::fmt;

use crate::error::{AgentError, Result};

/// Default agent host when none is given.
pub const DEFAULT_AGENT_HOST: &str = "127.0.0.1";
/// Default agent TCP port when none is given.
pub const DEFAULT_AGENT_PORT: u16 = 8888;
/// Environment variable consulted when no explicit address is supplied.
pub const AGENT_ADDR_ENV: &str = "AGENT_ADDR";

/// A resolved agent address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentAddr {
    pub host: String,
    pub port: u16,
}

impl AgentAddr {
    /// Resolve an optional address string against the environment and the
    /// built-in defaults.
    pub fn resolve(addr: Option<&str>) -> Result<AgentAddr> {
        match addr {
            Some(s) if !s.is_empty() => AgentAddr::parse(s),
            _ => match env::var(AGENT_ADDR_ENV) {
                Ok(s) if !s.is_empty() => AgentAddr::parse(&s),
                _ => Ok(AgentAddr::default()),
            },
        }
    }

    /// Parse a `host:port` string, defaulting either half when omitted.
    pub fn parse(addr: &str) -> Result<AgentAddr> {
        let mut parts = addr.splitn(2, ':');
        let host = match parts.next() {
            Some("") | None => DEFAULT_AGENT_HOST,
            Some(h) => h,
        };
        let port = match parts.next() {
            Some("") | None => DEFAULT_AGENT_PORT,
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| AgentError::Address(addr.to_string()))?,
        };
        Ok(AgentAddr {
            host: host.to_string(),
            port,
        })
    }
}

impl Default for AgentAddr {
    fn default() -> Self {
        AgentAddr {
            host: DEFAULT_AGENT_HOST.to_string(),
            port: DEFAULT_AGENT_PORT,
        }
    }
}

impl fmt::Display for AgentAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
