//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in `infra/`.

use kernel::id::{CardId, UserId};

use crate::domain::entities::{Card, CartChange, LikeState};
use crate::domain::value_objects::BizNumber;
use crate::error::CardResult;

#[trait_variant::make(CardRepository: Send)]
pub trait LocalCardRepository {
    /// Fails with `CardError::BizNumberTaken` when the number is in use
    async fn create(&self, card: &Card) -> CardResult<()>;

    async fn biz_number_exists(&self, biz_number: BizNumber) -> CardResult<bool>;

    async fn find_by_id(&self, card_id: &CardId) -> CardResult<Option<Card>>;

    /// Oldest first
    async fn list_all(&self) -> CardResult<Vec<Card>>;

    async fn list_by_owner(&self, user_id: &UserId) -> CardResult<Vec<Card>>;

    async fn list_liked_by(&self, user_id: &UserId) -> CardResult<Vec<Card>>;

    async fn list_in_cart_of(&self, user_id: &UserId) -> CardResult<Vec<Card>>;

    /// Persist content fields; `None` when the card no longer exists
    async fn update_content(&self, card: &Card) -> CardResult<Option<Card>>;

    /// Returns the removed card
    async fn delete(&self, card_id: &CardId) -> CardResult<Option<Card>>;

    /// Atomic like toggle; `None` when the card does not exist
    async fn toggle_like(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<(Card, LikeState)>>;

    /// Atomic cart append without duplicates
    async fn add_to_cart(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<(Card, CartChange)>>;

    async fn remove_from_cart(&self, card_id: &CardId, user_id: &UserId)
    -> CardResult<Option<Card>>;
}
