//! Card Error Types
//!
//! Card-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Card not found")]
    CardNotFound,

    /// Requester lacks the business or admin flag
    #[error("Unauthorized")]
    NotPublisher,

    /// Requester neither owns the card nor is an admin; carries the verb
    #[error("You are not authorized to {0} this card")]
    NotOwner(&'static str),

    /// Request body or path failed validation
    #[error("{0}")]
    Validation(String),

    /// Unique index on `biz_number` rejected the insert
    #[error("bizNumber {0} is already taken")]
    BizNumberTaken(i32),

    #[error("Could not allocate a free bizNumber")]
    BizNumberExhausted,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CardError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CardError::CardNotFound => ErrorKind::NotFound,
            CardError::NotPublisher => ErrorKind::Unauthorized,
            CardError::NotOwner(_) => ErrorKind::Forbidden,
            CardError::Validation(_) => ErrorKind::BadRequest,
            CardError::BizNumberTaken(_) => ErrorKind::Conflict,
            CardError::BizNumberExhausted | CardError::Database(_) | CardError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CardError::NotPublisher => AppError::unauthorized(self.to_string())
                .with_action("A business account is required to manage cards"),
            CardError::Database(_) | CardError::Internal(_) | CardError::BizNumberExhausted => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CardError::Database(e) => {
                tracing::error!(error = %e, "Card database error");
            }
            CardError::Internal(msg) => {
                tracing::error!(message = %msg, "Card internal error");
            }
            CardError::BizNumberExhausted => {
                tracing::error!("bizNumber space exhausted");
            }
            CardError::CardNotFound => {
                tracing::error!("Card not found");
            }
            _ => {
                tracing::debug!(error = %self, "Card error");
            }
        }
    }
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Kernel value objects and id parsing reject input with client errors
impl From<AppError> for CardError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            CardError::Validation(err.message().to_string())
        } else {
            CardError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CardError::CardNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(CardError::NotPublisher.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(CardError::NotOwner("edit").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            CardError::BizNumberExhausted.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_owner_message_names_the_action() {
        let err = CardError::NotOwner("delete").to_app_error();
        assert_eq!(err.message(), "You are not authorized to delete this card");
    }

    #[test]
    fn test_malformed_id_is_bad_request() {
        let err: CardError = kernel::id::CardId::parse_str("nope").unwrap_err().into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
