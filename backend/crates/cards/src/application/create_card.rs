//! Create Card Use Case

use std::sync::Arc;

use kernel::principal::Principal;

use crate::application::config::CardsConfig;
use crate::domain::entities::Card;
use crate::domain::repository::CardRepository;
use crate::domain::services::ensure_publisher;
use crate::domain::value_objects::{CardContent, CardDraft};
use crate::error::{CardError, CardResult};

pub struct CreateCardUseCase<R>
where
    R: CardRepository,
{
    repo: Arc<R>,
    config: Arc<CardsConfig>,
}

impl<R> CreateCardUseCase<R>
where
    R: CardRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CardsConfig>) -> Self {
        Self { repo, config }
    }

    /// Publish a card owned by `principal` under a fresh bizNumber
    pub async fn execute(&self, principal: &Principal, mut draft: CardDraft) -> CardResult<Card> {
        // Role check comes before body validation
        ensure_publisher(principal)?;

        draft.image = self.config.image_or_default(draft.image);
        let content = CardContent::new(draft)?;

        for _ in 0..self.config.biz_number_max_attempts {
            let biz_number = self.config.random_biz_number();
            if self.repo.biz_number_exists(biz_number).await? {
                continue;
            }

            let card = Card::new(principal.user_id, biz_number, content.clone());
            match self.repo.create(&card).await {
                Ok(()) => {
                    tracing::info!(
                        card_id = %card.card_id,
                        user_id = %card.user_id,
                        biz_number = %card.biz_number,
                        "Card created"
                    );
                    return Ok(card);
                }
                // Lost a race for the same number
                Err(CardError::BizNumberTaken(n)) => {
                    tracing::debug!(biz_number = n, "bizNumber collision, drawing again");
                }
                Err(e) => return Err(e),
            }
        }

        Err(CardError::BizNumberExhausted)
    }
}
