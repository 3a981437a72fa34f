//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the business cards vocabulary:
//! - Common error types and result aliases
//! - Typed IDs for users, cards and sessions
//! - The authenticated requester ([`principal::Principal`])
//! - Contact value objects shared by user profiles and cards
//!
//! Only things with the same meaning in every domain crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod contact;
pub mod email;
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod principal;
