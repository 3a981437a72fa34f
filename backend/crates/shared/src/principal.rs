//! Authenticated requester
//!
//! The auth middleware resolves a session into a [`Principal`] and stores it
//! in request extensions. Handlers that need a signed-in user take it as an
//! extractor; the request is rejected with 401 when it is absent.

use serde::Serialize;

use crate::id::UserId;

/// Identity and role flags of the user behind a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: UserId,
    pub is_business: bool,
    pub is_admin: bool,
}

impl Principal {
    pub fn new(user_id: UserId, is_business: bool, is_admin: bool) -> Self {
        Self {
            user_id,
            is_business,
            is_admin,
        }
    }

    /// Business users and admins may publish cards
    pub fn can_publish(&self) -> bool {
        self.is_business || self.is_admin
    }

    /// Admins act on any record; everyone else only on their own
    pub fn can_manage(&self, owner: UserId) -> bool {
        self.is_admin || (self.is_business && self.user_id == owner)
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().copied().ok_or_else(|| {
            crate::error::app_error::AppError::unauthorized("Authentication required")
                .with_action("Please log in and try again")
        })
    }
}
