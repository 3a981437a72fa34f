//! In-memory repository
//!
//! Backs the router tests and local runs without a database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use kernel::{
    email::Email,
    id::{SessionId, UserId},
};

use crate::domain::entity::{
    auth::Auth, auth_session::AuthSession, user::User, user_details::UserDetails,
};
use crate::domain::repository::{
    AuthRepository, AuthSessionRepository, UserDetailsRepository, UserRepository,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    details: HashMap<UserId, UserDetails>,
    credentials: HashMap<UserId, Auth>,
    sessions: HashMap<SessionId, AuthSession>,
}

/// Clones share the same tables
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AuthResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| AuthError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> AuthResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| AuthError::Internal("lock poisoned".to_string()))
    }

    /// Flip role flags directly (no endpoint grants admin)
    pub fn set_role(&self, user_id: &UserId, is_business: bool, is_admin: bool) -> AuthResult<()> {
        let mut tables = self.write()?;
        let user = tables.users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        user.role.is_business = is_business;
        user.role.is_admin = is_admin;
        Ok(())
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_account(
        &self,
        user: &User,
        details: &UserDetails,
        auth: &Auth,
    ) -> AuthResult<()> {
        let mut tables = self.write()?;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        if details.user_id != user.user_id || auth.user_id != user.user_id {
            return Err(AuthError::Internal(
                "profile and credentials must belong to the new user".to_string(),
            ));
        }
        tables.users.insert(user.user_id, user.clone());
        tables.details.insert(user.user_id, details.clone());
        tables.credentials.insert(user.user_id, auth.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.read()?.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.read()?.users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.read()?.users.values().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.write()?.users.insert(user.user_id, user.clone());
        Ok(())
    }
}

impl UserDetailsRepository for InMemoryAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<UserDetails>> {
        Ok(self.read()?.details.get(user_id).cloned())
    }
}

impl AuthRepository for InMemoryAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>> {
        Ok(self.read()?.credentials.get(user_id).cloned())
    }

    async fn update(&self, auth: &Auth) -> AuthResult<()> {
        self.write()?.credentials.insert(auth.user_id, auth.clone());
        Ok(())
    }
}

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.write()?.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: &SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let tables = self.read()?;
        match tables.sessions.get(session_id) {
            Some(s) if s.is_expired() => Ok(None),
            Some(s) if s.client_fingerprint_hash != fingerprint_hash => {
                Err(AuthError::SessionFingerprintMismatch)
            }
            Some(s) => Ok(Some(s.clone())),
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        let mut tables = self.write()?;
        // A session deleted by logout stays deleted
        if let Some(stored) = tables.sessions.get_mut(&session.session_id) {
            stored.expires_at_ms = session.expires_at_ms;
            stored.last_activity_at = session.last_activity_at;
        }
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.write()?.sessions.remove(session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut tables = self.write()?;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - tables.sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use kernel::contact::{Address, Image, Phone};

    use super::*;
    use crate::domain::value_object::{
        person_name::PersonName,
        user_password::{RawPassword, UserPassword},
    };

    fn account(email: &str) -> (User, UserDetails, Auth) {
        let user = User::register(Email::new(email).unwrap(), false);
        let details = UserDetails::new(
            user.user_id,
            PersonName::new("Dana", None, "Levi").unwrap(),
            Phone::new("050-1234567").unwrap(),
            Image::placeholder(),
            Address {
                state: None,
                country: "Israel".to_string(),
                city: "Haifa".to_string(),
                street: "Herzl".to_string(),
                house_number: 12,
                zip: None,
            },
        );
        let raw = RawPassword::new("Card!Maker9".to_string()).unwrap();
        let auth = Auth::new(user.user_id, UserPassword::from_raw(&raw, None).unwrap());
        (user, details, auth)
    }

    #[tokio::test]
    async fn test_create_account_stores_all_three_records() {
        let repo = InMemoryAuthRepository::new();
        let (user, details, auth) = account("dana@acme.co.il");
        repo.create_account(&user, &details, &auth).await.unwrap();

        assert!(UserRepository::find_by_id(&repo, &user.user_id).await.unwrap().is_some());
        assert!(
            UserDetailsRepository::find_by_user_id(&repo, &user.user_id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            AuthRepository::find_by_user_id(&repo, &user.user_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_failed_create_account_leaves_no_partial_user() {
        let repo = InMemoryAuthRepository::new();
        let (user, details, _) = account("dana@acme.co.il");
        let (_, _, foreign_auth) = account("other@acme.co.il");

        let result = repo.create_account(&user, &details, &foreign_auth).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));

        // The email stays free and no orphan profile or credentials remain
        assert!(!repo.exists_by_email(&user.email).await.unwrap());
        assert!(
            UserDetailsRepository::find_by_user_id(&repo, &user.user_id)
                .await
                .unwrap()
                .is_none()
        );
        let (retry_user, retry_details, retry_auth) = account("dana@acme.co.il");
        repo.create_account(&retry_user, &retry_details, &retry_auth)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_account_duplicate_email_keeps_existing_records() {
        let repo = InMemoryAuthRepository::new();
        let (first, first_details, first_auth) = account("dana@acme.co.il");
        repo.create_account(&first, &first_details, &first_auth).await.unwrap();

        let (second, second_details, second_auth) = account("Dana@Acme.co.il");
        let result = repo.create_account(&second, &second_details, &second_auth).await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert!(
            AuthRepository::find_by_user_id(&repo, &second.user_id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            AuthRepository::find_by_user_id(&repo, &first.user_id)
                .await
                .unwrap()
                .is_some()
        );
    }
}
