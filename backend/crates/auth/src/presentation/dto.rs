//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::{
    contact::{Address, Image},
    id::UserId,
};
use serde::{Deserialize, Serialize};

use crate::application::current_user::CurrentUser;
use crate::domain::value_object::person_name::PersonName;

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NameDto {
    pub first: String,
    #[serde(default)]
    pub middle: Option<String>,
    pub last: String,
}

/// Registration form, nested the way the frontend submits it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: NameDto,
    pub phone: String,
    pub email: String,
    pub password: String,
    /// Older clients send the picture under `url`
    #[serde(default, alias = "url")]
    pub image: Image,
    pub address: Address,
    #[serde(default)]
    pub is_business: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: UserId,
    pub email: String,
    pub is_business: bool,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: UserId,
    /// Same value as the session cookie, for `Authorization: Bearer`
    pub token: String,
    pub is_business: bool,
    pub is_admin: bool,
}

// ============================================================================
// Session Status
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_business: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<i64>,
}

// ============================================================================
// Current User
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    pub is_business: bool,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CurrentUser> for UserProfileResponse {
    fn from(CurrentUser { user, details }: CurrentUser) -> Self {
        let (name, phone, image, address) = match details {
            Some(d) => (
                Some(d.name),
                Some(d.phone.as_str().to_string()),
                Some(d.image),
                Some(d.address),
            ),
            None => (None, None, None, None),
        };

        Self {
            id: user.user_id,
            email: user.email.as_str().to_string(),
            is_business: user.role.is_business,
            is_admin: user.role.is_admin,
            name,
            phone,
            image,
            address,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}
