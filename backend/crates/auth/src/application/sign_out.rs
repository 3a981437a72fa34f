//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::{config::AuthConfig, session_token};
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let session_id = session_token::verify(token, &self.config.session_secret)?;
        self.session_repo.delete(&session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
