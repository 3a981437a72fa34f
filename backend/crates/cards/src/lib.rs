//! Cards Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Card entity, content value objects, repository trait, authorization rules
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Permissions
//! - Anyone may browse cards
//! - Business users and admins publish cards and list their own
//! - Only the owning business user or an admin edits or deletes a card
//! - Any signed-in user likes cards and keeps a cart
//!
//! Likes and cart membership change in a single repository operation, so
//! concurrent requests never lose an update or duplicate a user id.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::CardsConfig;
pub use error::{CardError, CardResult};
pub use infra::{memory::InMemoryCardRepository, postgres::PgCardRepository};
pub use presentation::{CardsAppState, cards_router, cards_router_generic};
