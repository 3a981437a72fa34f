//! Delete Card Use Case

use std::sync::Arc;

use kernel::{id::CardId, principal::Principal};

use crate::domain::entities::Card;
use crate::domain::repository::CardRepository;
use crate::domain::services::authorize_owner;
use crate::error::{CardError, CardResult};

pub struct DeleteCardUseCase<R>
where
    R: CardRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCardUseCase<R>
where
    R: CardRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the deleted card
    pub async fn execute(&self, principal: &Principal, card_id: &CardId) -> CardResult<Card> {
        let card = self
            .repo
            .find_by_id(card_id)
            .await?
            .ok_or(CardError::CardNotFound)?;

        authorize_owner(principal, &card, "delete")?;

        let deleted = self
            .repo
            .delete(card_id)
            .await?
            .ok_or(CardError::CardNotFound)?;

        tracing::debug!(card_id = %card_id, "Card deleted successfully");
        Ok(deleted)
    }
}
