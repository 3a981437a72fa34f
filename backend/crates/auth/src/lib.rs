//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with a business-card style profile (name, phone, image, address)
//! - Email + password login, logout, session status, current user
//! - Server-side sessions referenced by signed tokens (cookie or bearer)
//! - Role flags (`isBusiness`, `isAdmin`) resolved into a [`kernel::principal::Principal`]
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Sessions bound to client fingerprint (User-Agent)
//! - Temporary lockout after repeated failed logins

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::{
    AuthAppState, attach_principal, authenticate, users_router, users_router_generic,
};
