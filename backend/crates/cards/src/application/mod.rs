//! Application Layer
//!
//! Use cases and configuration.

pub mod config;
pub mod create_card;
pub mod delete_card;
pub mod engagement;
pub mod query_cards;
pub mod update_card;

pub use config::CardsConfig;
pub use create_card::CreateCardUseCase;
pub use delete_card::DeleteCardUseCase;
pub use engagement::EngagementUseCase;
pub use query_cards::QueryCardsUseCase;
pub use update_card::{CardPatch, UpdateCardUseCase};
