//! Auth Session Entity
//!
//! Server-side session referenced by a signed token.

use chrono::{DateTime, Duration, Utc};
use kernel::{
    id::{SessionId, UserId},
    principal::Principal,
};

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Role flags at login time
    pub role: UserRole,
    /// Unix timestamp (ms)
    pub expires_at_ms: i64,
    pub remember_me: bool,
    /// SHA-256 of the User-Agent that logged in
    pub client_fingerprint_hash: Vec<u8>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// TTL comes from `AuthConfig`
    pub fn new(
        user_id: UserId,
        role: UserRole,
        remember_me: bool,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            user_id,
            role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            remember_me,
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Slide a remember-me session forward once less than half its TTL remains
    pub fn extend_if_needed(&mut self, ttl_long: Duration) {
        if !self.remember_me {
            return;
        }
        let now = Utc::now();
        if self.expires_at_ms < (now + ttl_long / 2).timestamp_millis() {
            self.expires_at_ms = (now + ttl_long).timestamp_millis();
        }
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role.is_business, self.role.is_admin)
    }
}
