//! User Entity
//!
//! Login identity and role flags. Profile data lives in
//! [`UserDetails`](super::user_details::UserDetails), credentials in
//! [`Auth`](super::auth::Auth).

use chrono::{DateTime, Utc};
use kernel::{email::Email, id::UserId, principal::Principal};

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Login identifier, unique
    pub email: Email,
    pub role: UserRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn register(email: Email, is_business: bool) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            role: UserRole::registered(is_business),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role.is_business, self.role.is_admin)
    }
}
