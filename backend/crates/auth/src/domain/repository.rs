//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in `infra/`.

use kernel::{
    email::Email,
    id::{SessionId, UserId},
};

use crate::domain::entity::{
    auth::Auth, auth_session::AuthSession, user::User, user_details::UserDetails,
};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Store a new user with profile and credentials, all or nothing
    ///
    /// Fails with `AuthError::EmailTaken` when the email is registered.
    async fn create_account(
        &self,
        user: &User,
        details: &UserDetails,
        auth: &Auth,
    ) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    async fn update(&self, user: &User) -> AuthResult<()>;
}

#[trait_variant::make(UserDetailsRepository: Send)]
pub trait LocalUserDetailsRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<UserDetails>>;
}

#[trait_variant::make(AuthRepository: Send)]
pub trait LocalAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>>;

    async fn update(&self, auth: &Auth) -> AuthResult<()>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Unexpired session; a fingerprint mismatch is an error, not `None`
    async fn find_by_id(
        &self,
        session_id: &SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Persist last activity and expiry
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Remove expired rows, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
