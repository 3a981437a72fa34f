//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity {
    pub mod auth;
    pub mod auth_session;
    pub mod user;
    pub mod user_details;
}
pub mod repository;
pub mod value_object;

pub use entity::{
    auth::Auth, auth_session::AuthSession, user::User, user_details::UserDetails,
};
pub use repository::{AuthRepository, AuthSessionRepository, UserDetailsRepository, UserRepository};
