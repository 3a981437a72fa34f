//! Update Card Use Case
//!
//! Merges the submitted fields over the stored card and revalidates the
//! result. Ownership, bizNumber, likes and cart entries never change here.

use std::sync::Arc;

use kernel::{
    contact::{Address, Image},
    id::CardId,
    principal::Principal,
};

use crate::application::config::CardsConfig;
use crate::domain::entities::Card;
use crate::domain::repository::CardRepository;
use crate::domain::services::authorize_owner;
use crate::domain::value_objects::{CardContent, CardDraft, Price};
use crate::error::{CardError, CardResult};

/// Fields to overwrite; `None` keeps the stored value
///
/// `price: Some(None)` clears the price.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub web: Option<String>,
    pub image: Option<Image>,
    pub address: Option<Address>,
    pub price: Option<Option<Price>>,
}

impl CardPatch {
    fn apply_to(self, draft: CardDraft) -> CardDraft {
        CardDraft {
            title: self.title.unwrap_or(draft.title),
            subtitle: self.subtitle.unwrap_or(draft.subtitle),
            description: self.description.unwrap_or(draft.description),
            phone: self.phone.unwrap_or(draft.phone),
            email: self.email.unwrap_or(draft.email),
            web: self.web.or(draft.web),
            image: self.image.unwrap_or(draft.image),
            address: self.address.unwrap_or(draft.address),
            price: self.price.unwrap_or(draft.price),
        }
    }
}

pub struct UpdateCardUseCase<R>
where
    R: CardRepository,
{
    repo: Arc<R>,
    config: Arc<CardsConfig>,
}

impl<R> UpdateCardUseCase<R>
where
    R: CardRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CardsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        card_id: &CardId,
        patch: CardPatch,
    ) -> CardResult<Card> {
        let mut card = self
            .repo
            .find_by_id(card_id)
            .await?
            .ok_or(CardError::CardNotFound)?;

        authorize_owner(principal, &card, "edit")?;

        let mut draft = patch.apply_to(card.content.to_draft());
        draft.image = self.config.image_or_default(draft.image);
        card.replace_content(CardContent::new(draft)?);

        let updated = self
            .repo
            .update_content(&card)
            .await?
            .ok_or(CardError::CardNotFound)?;

        tracing::info!(card_id = %card_id, "Card updated successfully");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CardDraft {
        CardDraft {
            title: "Old title".to_string(),
            subtitle: "Subtitle".to_string(),
            description: "Description".to_string(),
            phone: "050-1234567".to_string(),
            email: "a@b.co".to_string(),
            web: Some("https://b.co/".to_string()),
            image: Image::placeholder(),
            address: Address {
                state: None,
                country: "Israel".to_string(),
                city: "Haifa".to_string(),
                street: "Herzl".to_string(),
                house_number: 1,
                zip: None,
            },
            price: Some(Price::from_cents(100)),
        }
    }

    #[test]
    fn test_patch_overlays_only_given_fields() {
        let merged = CardPatch {
            title: Some("New title".to_string()),
            ..CardPatch::default()
        }
        .apply_to(draft());

        assert_eq!(merged.title, "New title");
        assert_eq!(merged.subtitle, "Subtitle");
        assert_eq!(merged.web.as_deref(), Some("https://b.co/"));
        assert_eq!(merged.price, Some(Price::from_cents(100)));
    }

    #[test]
    fn test_patch_can_clear_price() {
        let draft = draft();

        let cleared = CardPatch {
            price: Some(None),
            ..CardPatch::default()
        }
        .apply_to(draft.clone());
        assert_eq!(cleared.price, None);

        let replaced = CardPatch {
            price: Some(Some(Price::from_cents(250))),
            ..CardPatch::default()
        }
        .apply_to(draft);
        assert_eq!(replaced.price, Some(Price::from_cents(250)));
    }
}
