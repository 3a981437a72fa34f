//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email is already registered")]
    EmailTaken,

    /// Wrong email or password; never says which
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is temporarily locked")]
    AccountLocked,

    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Request body failed validation
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::AccountLocked => ErrorKind::Locked,
            AuthError::Validation(_) | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::EmailTaken => AppError::conflict(self.to_string())
                .with_action("Log in instead, or register with a different email"),
            AuthError::AccountLocked => AppError::new(self.kind(), self.to_string())
                .with_action("Too many failed attempts. Try again in a few minutes"),
            AuthError::SessionInvalid | AuthError::SessionFingerprintMismatch => {
                AppError::unauthorized("Authentication required")
                    .with_action("Please log in and try again")
            }
            // Storage details stay in the logs
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Kernel value objects reject input with client errors
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::AccountLocked.status_code(), StatusCode::LOCKED);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AuthError::Internal("pool exhausted".into()).to_app_error();
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_from_app_error() {
        let err: AuthError = AppError::bad_request("\"phone\" must contain 9 to 11 digits").into();
        assert!(matches!(err, AuthError::Validation(ref m) if m.contains("phone")));

        let err: AuthError = AppError::internal("disk").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
