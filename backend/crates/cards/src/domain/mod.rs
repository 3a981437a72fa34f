//! Domain Layer
//!
//! Card entity, value objects, repository trait and authorization rules.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
