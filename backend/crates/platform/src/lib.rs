//! Platform Crate - Technical Infrastructure
//!
//! Building blocks shared by the domain crates:
//! - Cryptographic helpers (SHA-256, HMAC-SHA256, base64url)
//! - Password policy and Argon2id hashing
//! - Session cookie and bearer token handling
//! - Client fingerprinting from request headers

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
