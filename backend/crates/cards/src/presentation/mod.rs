//! Presentation Layer
//!
//! HTTP handlers, DTOs and the `/api/cards` router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CardsAppState;
pub use router::{cards_router, cards_router_generic};
