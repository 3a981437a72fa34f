//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
pub use platform::cookie::SameSite;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie attributes
    pub cookie: CookieConfig,
    /// HMAC key for session tokens
    pub session_secret: [u8; 32],
    /// Session TTL without "Remember Me" (12 hours)
    pub session_ttl_short: Duration,
    /// Session TTL with "Remember Me" (1 week)
    pub session_ttl_long: Duration,
    /// Application-wide secret appended to passwords before hashing
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie: CookieConfig::default(),
            session_secret: [0u8; 32],
            session_ttl_short: Duration::from_secs(12 * 3600),
            session_ttl_long: Duration::from_secs(7 * 24 * 3600),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    pub fn with_secret(session_secret: [u8; 32]) -> Self {
        Self {
            session_secret,
            ..Default::default()
        }
    }

    /// Random secret, insecure cookie (local development and tests)
    pub fn development() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);

        let mut config = Self::with_secret(secret);
        config.cookie.secure = false;
        config
    }

    pub fn session_ttl(&self, remember_me: bool) -> Duration {
        if remember_me {
            self.session_ttl_long
        } else {
            self.session_ttl_short
        }
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }
}
