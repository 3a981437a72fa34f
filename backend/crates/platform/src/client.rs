//! Client identification
//!
//! Sessions are bound to the User-Agent that created them.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

use crate::crypto::sha256;

/// Client fingerprint derived from request headers
#[derive(Debug, Clone)]
pub struct ClientFingerprint {
    /// SHA-256 of the User-Agent header (of `""` when absent)
    pub hash: [u8; 32],
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientFingerprint {
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            hash: sha256(user_agent.as_deref().unwrap_or_default().as_bytes()),
            ip: client_ip(headers, direct_ip),
            user_agent,
        }
    }

    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Client IP, preferring the first `X-Forwarded-For` entry
pub fn client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or(direct_ip)
}
