//! Server Configuration
//!
//! Environment-driven configuration for the site server.

use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

/// Default listen address. Binds all interfaces so the dev server is
/// reachable from other hosts, matching the original deployment.
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Default directory holding page content.
const DEFAULT_CONTENT_DIR: &str = "content/pages";

/// Errors produced while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Runtime configuration for the site server.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub addr: SocketAddr,
    /// Directory containing page markdown files.
    pub content_dir: PathBuf,
}

impl Config {
    /// Read configuration from `PAGEFOLD_ADDR` and `PAGEFOLD_CONTENT`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_addr = env::var("PAGEFOLD_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = parse_addr(&raw_addr)?;

        let content_dir = env::var("PAGEFOLD_CONTENT")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONTENT_DIR), PathBuf::from);

        Ok(Self { addr, content_dir })
    }
}

fn parse_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.parse().map_err(|source| ConfigError::InvalidAddr {
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr_parses() {
        let addr = parse_addr(DEFAULT_ADDR).unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_loopback_addr_parses() {
        let addr = parse_addr("127.0.0.1:8080").unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_invalid_addr_is_rejected() {
        let err = parse_addr("not-an-address").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
    }

    #[test]
    fn test_missing_port_is_rejected() {
        assert!(parse_addr("0.0.0.0").is_err());
    }
}
