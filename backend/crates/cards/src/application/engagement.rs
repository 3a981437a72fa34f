//! Likes and cart
//!
//! Open to any signed-in user. Each operation is one atomic repository call.

use std::sync::Arc;

use kernel::{id::CardId, principal::Principal};

use crate::domain::entities::{Card, CartChange, LikeState};
use crate::domain::repository::CardRepository;
use crate::error::{CardError, CardResult};

pub struct EngagementUseCase<R>
where
    R: CardRepository,
{
    repo: Arc<R>,
}

impl<R> EngagementUseCase<R>
where
    R: CardRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn toggle_like(
        &self,
        principal: &Principal,
        card_id: &CardId,
    ) -> CardResult<(Card, LikeState)> {
        let (card, state) = self
            .repo
            .toggle_like(card_id, &principal.user_id)
            .await?
            .ok_or(CardError::CardNotFound)?;

        tracing::info!(card_id = %card_id, user_id = %principal.user_id, ?state, "Like toggled");
        Ok((card, state))
    }

    pub async fn add_to_cart(
        &self,
        principal: &Principal,
        card_id: &CardId,
    ) -> CardResult<(Card, CartChange)> {
        let (card, change) = self
            .repo
            .add_to_cart(card_id, &principal.user_id)
            .await?
            .ok_or(CardError::CardNotFound)?;

        tracing::info!(card_id = %card_id, user_id = %principal.user_id, ?change, "Add to cart");
        Ok((card, change))
    }

    pub async fn remove_from_cart(
        &self,
        principal: &Principal,
        card_id: &CardId,
    ) -> CardResult<Card> {
        let card = self
            .repo
            .remove_from_cart(card_id, &principal.user_id)
            .await?
            .ok_or(CardError::CardNotFound)?;

        tracing::info!(card_id = %card_id, user_id = %principal.user_id, "Removed from cart");
        Ok(card)
    }
}
