//! Best-effort check for a newer release.
//!
//! The release server publishes the latest version as a plain-text body.
//! Any failure is reported as "no update" and never reaches the planner.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::UpdateError;

/// Version of this build.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Compares the published version against the running one.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    url: String,
    current_version: String,
    timeout: Duration,
}

impl UpdateChecker {
    pub fn new(url: impl Into<String>, current_version: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            current_version: current_version.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Connect and read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True only when a different version is published.
    pub fn check(&self) -> bool {
        match self.fetch_latest() {
            Ok(latest) => {
                debug!("Published version {}, running {}", latest, self.current_version);
                latest != self.current_version
            }
            Err(e) => {
                warn!("Update check failed: {}", e);
                false
            }
        }
    }

    /// Fetch the published version string.
    pub fn fetch_latest(&self) -> Result<String, UpdateError> {
        let (host, port, path) = split_url(&self.url)?;

        let addr = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| UpdateError::UnresolvedHost {
                host: host.to_string(),
            })?;

        let mut stream = TcpStream::connect_timeout(&addr, self.timeout)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        let request = format!(
            "GET {} HTTP/1.0\r\nHost: {}\r\nConnection: close\r\n\r\n",
            path, host
        );
        stream.write_all(request.as_bytes())?;
        stream.flush()?;

        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        parse_response(&String::from_utf8_lossy(&buf))
    }
}

/// Split `http://host[:port]/path` into its parts. TLS is not supported, so
/// `https://` URLs are rejected.
fn split_url(url: &str) -> Result<(&str, u16, &str), UpdateError> {
    let invalid = || UpdateError::InvalidUrl {
        url: url.to_string(),
    };

    let rest = url.strip_prefix("http://").ok_or_else(invalid)?;
    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
        None => (authority, 80),
    };

    if host.is_empty() {
        return Err(invalid());
    }
    Ok((host, port, path))
}

/// Extract the trimmed body of a `200` response.
fn parse_response(response: &str) -> Result<String, UpdateError> {
    let (head, body) = response.split_once("\r\n\r\n").unwrap_or((response, ""));
    let status_line = head.lines().next().unwrap_or_default();

    let status = status_line.split_whitespace().nth(1);
    if status != Some("200") {
        return Err(UpdateError::HttpStatus {
            status_line: status_line.to_string(),
        });
    }

    let version = body.trim();
    if version.is_empty() {
        return Err(UpdateError::EmptyVersion);
    }
    Ok(version.to_string())
}
