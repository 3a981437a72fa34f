//! Check Session Use Case
//!
//! Resolves a session token into a live session.

use std::sync::Arc;

use crate::application::{config::AuthConfig, session_token};
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Verify the token, load the session and record activity
    pub async fn get_session(
        &self,
        token: &str,
        fingerprint_hash: &[u8],
    ) -> AuthResult<AuthSession> {
        let session_id = session_token::verify(token, &self.config.session_secret)?;

        let mut session = self
            .session_repo
            .find_by_id(&session_id, fingerprint_hash)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(&session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        session.touch();
        let ttl_long = chrono::Duration::from_std(self.config.session_ttl_long)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        session.extend_if_needed(ttl_long);

        // Activity bookkeeping must not delay the request
        let snapshot = session.clone();
        let repo = Arc::clone(&self.session_repo);
        tokio::spawn(async move {
            if let Err(e) = repo.update(&snapshot).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
