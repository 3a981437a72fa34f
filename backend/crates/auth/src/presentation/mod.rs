//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, AuthStore};
pub use middleware::{Client, attach_principal};
pub use router::{authenticate, users_router, users_router_generic};
