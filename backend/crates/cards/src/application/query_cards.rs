//! Card queries

use std::sync::Arc;

use kernel::{id::CardId, principal::Principal};

use crate::domain::entities::Card;
use crate::domain::repository::CardRepository;
use crate::domain::services::ensure_publisher;
use crate::error::{CardError, CardResult};

pub struct QueryCardsUseCase<R>
where
    R: CardRepository,
{
    repo: Arc<R>,
}

impl<R> QueryCardsUseCase<R>
where
    R: CardRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> CardResult<Vec<Card>> {
        self.repo.list_all().await
    }

    pub async fn by_id(&self, card_id: &CardId) -> CardResult<Card> {
        self.repo
            .find_by_id(card_id)
            .await?
            .ok_or(CardError::CardNotFound)
    }

    /// Cards published by the requester
    pub async fn my_cards(&self, principal: &Principal) -> CardResult<Vec<Card>> {
        ensure_publisher(principal)?;
        let cards = self.repo.list_by_owner(&principal.user_id).await?;
        tracing::debug!(user_id = %principal.user_id, count = cards.len(), "Listed user cards");
        Ok(cards)
    }

    pub async fn favorites(&self, principal: &Principal) -> CardResult<Vec<Card>> {
        self.repo.list_liked_by(&principal.user_id).await
    }

    pub async fn cart(&self, principal: &Principal) -> CardResult<Vec<Card>> {
        self.repo.list_in_cart_of(&principal.user_id).await
    }
}
