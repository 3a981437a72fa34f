//! Password Policy and Hashing
//!
//! Passwords are NFKC-normalized, checked against the account policy and
//! hashed with Argon2id. An optional application pepper is appended before
//! hashing. Clear text is zeroized on drop.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Symbols that satisfy the "special character" rule
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*-_";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    Blank,

    #[error("Password contains invalid control characters")]
    ControlCharacter,

    /// Missing uppercase, lowercase, digit or symbol
    #[error("Password must contain at least one {0}")]
    MissingClass(&'static str),
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password
// ============================================================================

/// Password as typed by the user
///
/// Not `Clone`; `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize and validate a new password (registration)
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::normalized(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Normalize without policy checks (login attempts)
    ///
    /// Login must not reveal the policy, and accounts created under an
    /// older policy must still be able to sign in.
    pub fn for_verification(raw: String) -> Self {
        Self::normalized(raw)
    }

    fn normalized(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let value = self.0.as_str();
        if value.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let count = value.chars().count();
        if count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: count,
            });
        }
        if count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: count,
            });
        }
        if value.chars().any(|c| c.is_control() && c != '\t') {
            return Err(PasswordPolicyError::ControlCharacter);
        }

        let classes: [(&'static str, fn(char) -> bool); 4] = [
            ("uppercase letter", char::is_uppercase),
            ("lowercase letter", char::is_lowercase),
            ("digit", |c| c.is_ascii_digit()),
            ("symbol (!@#$%^&*-_)", |c| PASSWORD_SYMBOLS.contains(c)),
        ];
        for (name, has) in classes {
            if !value.chars().any(has) {
                return Err(PasswordPolicyError::MissingClass(name));
            }
        }
        Ok(())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id (default parameters: m=19 MiB, t=2, p=1)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            phc: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

// ============================================================================
// Hashed Password
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    phc: String,
}

impl HashedPassword {
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { phc })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.phc
    }

    /// Constant-time verification (argon2 compares internally)
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}
