//! User Password Value Objects
//!
//! Thin domain wrappers over `platform::password`.

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Password as submitted by the user (zeroized on drop)
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// New password at registration; enforces the policy
    pub fn new(raw: String) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    /// Password from a login form; compared, never validated
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored Argon2id hash
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        Ok(Self(raw.0.hash(pepper)?))
    }

    pub fn from_db(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_are_bad_requests() {
        let err = RawPassword::new("short".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::PasswordPolicy(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Card!Maker9".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(hashed.verify(&RawPassword::for_login("Card!Maker9".to_string()), Some(b"pepper")));
        assert!(!hashed.verify(&RawPassword::for_login("Card!Maker8".to_string()), Some(b"pepper")));
    }

    #[test]
    fn test_from_db_rejects_garbage() {
        assert!(UserPassword::from_db("not-a-phc-string").is_err());
    }
}
