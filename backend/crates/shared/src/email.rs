//! Email Value Object
//!
//! Used as the login identifier for users and as the contact address on
//! cards. Format validation only; nothing here proves the mailbox exists.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::app_error::{AppError, AppResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Lowercased, trimmed email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(AppError::bad_request("Invalid email format")
                .with_action("Please enter a valid email address"));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || local.contains(char::is_whitespace) {
            return false;
        }

        // A second '@' lands in the domain part and fails the charset check.
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
            return false;
        }

        true
    }

    /// Rehydrate a value that was validated before it was stored
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("owner@acme.com").is_ok());
        assert!(Email::new("Owner@Acme.COM").is_ok());
        assert!(Email::new("first.last@acme.co.il").is_ok());
        assert!(Email::new("sales+cards@acme.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("acme.com").is_err());
        assert!(Email::new("owner@").is_err());
        assert!(Email::new("@acme.com").is_err());
        assert!(Email::new("owner@@acme.com").is_err());
        assert!(Email::new("owner@acme").is_err());
        assert!(Email::new("owner@-acme.com").is_err());
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("  Owner@Acme.COM ").unwrap();
        assert_eq!(email.as_str(), "owner@acme.com");
    }

    #[test]
    fn test_email_deserialize_validates() {
        let ok: Email = serde_json::from_str(r#""a@b.io""#).unwrap();
        assert_eq!(ok.as_str(), "a@b.io");
        assert!(serde_json::from_str::<Email>(r#""nope""#).is_err());
    }
}
