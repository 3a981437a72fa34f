//! Sign In Use Case
//!
//! Authenticates a user by email and password and creates a session.

use std::sync::Arc;

use chrono::Utc;
use kernel::{email::Email, id::UserId};
use platform::client::ClientFingerprint;

use crate::application::{config::AuthConfig, session_token};
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthRepository, AuthSessionRepository, UserRepository};
use crate::domain::value_object::{user_password::RawPassword, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

pub struct SignInOutput {
    pub session_token: String,
    pub user_id: UserId,
    pub role: UserRole,
    /// Cookie lifetime, matching the session TTL
    pub max_age_secs: i64,
}

pub struct SignInUseCase<R>
where
    R: UserRepository + AuthRepository + AuthSessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + AuthRepository + AuthSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = UserRepository::find_by_email(&*self.repo, &email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let mut auth = AuthRepository::find_by_user_id(&*self.repo, &user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal(format!("No credentials for {}", user.user_id)))?;

        let now = Utc::now();
        if auth.is_locked(now) {
            return Err(AuthError::AccountLocked);
        }

        let raw_password = RawPassword::for_login(input.password);
        if !auth.password_hash.verify(&raw_password, self.config.pepper()) {
            auth.record_failure(now);
            AuthRepository::update(&*self.repo, &auth).await?;
            tracing::info!(
                user_id = %user.user_id,
                failures = auth.login_failed_count,
                "Password mismatch"
            );
            return Err(if auth.is_locked(now) {
                AuthError::AccountLocked
            } else {
                AuthError::InvalidCredentials
            });
        }

        if auth.login_failed_count > 0 || auth.locked_until.is_some() {
            auth.reset_failures(now);
            AuthRepository::update(&*self.repo, &auth).await?;
        }

        user.record_login();
        UserRepository::update(&*self.repo, &user).await?;

        let ttl = self.config.session_ttl(input.remember_me);
        let session = AuthSession::new(
            user.user_id,
            user.role,
            input.remember_me,
            fingerprint.hash.to_vec(),
            fingerprint.ip_string(),
            fingerprint.user_agent.clone(),
            chrono::Duration::from_std(ttl)
                .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?,
        );
        AuthSessionRepository::create(&*self.repo, &session).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            remember_me = input.remember_me,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token: session_token::sign(&session.session_id, &self.config.session_secret),
            user_id: user.user_id,
            role: user.role,
            max_age_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        })
    }
}
