//! Server configuration loaded from environment variables
//!
//! ## Required
//! - `DATABASE_URL` - PostgreSQL connection string
//! - `SESSION_SECRET` - base64 encoded 32 byte key (release builds only)
//!
//! ## Optional
//! - `DATABASE_MAX_CONNECTIONS` - pool size (default: 5)
//! - `BIND_ADDR` - listen address (default: 0.0.0.0:8181)
//! - `FRONTEND_ORIGINS` - comma separated CORS origins
//! - `PASSWORD_PEPPER` - secret mixed into password hashes
//! - `STATIC_DIR` - built frontend to serve

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8181";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub session_secret: Option<[u8; 32]>,
    pub password_pepper: Option<Vec<u8>>,
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_raw}"))?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect::<anyhow::Result<Vec<_>>>()?;

        let session_secret = get("SESSION_SECRET")
            .map(|raw| decode_secret(&raw))
            .transpose()?;

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            session_secret,
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }

    /// Session settings; debug builds fall back to a random secret
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let mut config = match self.session_secret {
            Some(secret) => AuthConfig::with_secret(secret),
            None if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, using a random development secret");
                AuthConfig::development()
            }
            None => bail!("SESSION_SECRET must be set in production"),
        };
        config.password_pepper = self.password_pepper.clone();
        Ok(config)
    }
}

/// `scheme://host[:port]`, no path
fn parse_origin(origin: &str) -> anyhow::Result<HeaderValue> {
    let host = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"));
    match host {
        Some(host) if !host.is_empty() && !host.contains('/') => origin
            .parse()
            .with_context(|| format!("FRONTEND_ORIGINS entry is not a valid header value: {origin}")),
        _ => bail!("FRONTEND_ORIGINS entry is not an http(s) origin: {origin}"),
    }
}

fn decode_secret(raw: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(raw.trim())
        .context("SESSION_SECRET is not valid base64")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", b.len()))
}
