//! In-memory repository
//!
//! Backs the router tests. Every mutation runs under one write lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kernel::id::{CardId, UserId};

use crate::domain::entities::{Card, CartChange, LikeState};
use crate::domain::repository::CardRepository;
use crate::domain::value_objects::BizNumber;
use crate::error::{CardError, CardResult};

/// Clones share the same table
#[derive(Clone, Default)]
pub struct InMemoryCardRepository {
    cards: Arc<RwLock<HashMap<CardId, Card>>>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CardResult<RwLockReadGuard<'_, HashMap<CardId, Card>>> {
        self.cards
            .read()
            .map_err(|_| CardError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> CardResult<RwLockWriteGuard<'_, HashMap<CardId, Card>>> {
        self.cards
            .write()
            .map_err(|_| CardError::Internal("lock poisoned".to_string()))
    }

    fn select(&self, keep: impl Fn(&Card) -> bool) -> CardResult<Vec<Card>> {
        let mut cards: Vec<Card> = self.read()?.values().filter(|c| keep(c)).cloned().collect();
        cards.sort_by_key(|c| c.created_at);
        Ok(cards)
    }
}

impl CardRepository for InMemoryCardRepository {
    async fn create(&self, card: &Card) -> CardResult<()> {
        let mut cards = self.write()?;
        if cards.values().any(|c| c.biz_number == card.biz_number) {
            return Err(CardError::BizNumberTaken(card.biz_number.value()));
        }
        cards.insert(card.card_id, card.clone());
        Ok(())
    }

    async fn biz_number_exists(&self, biz_number: BizNumber) -> CardResult<bool> {
        Ok(self.read()?.values().any(|c| c.biz_number == biz_number))
    }

    async fn find_by_id(&self, card_id: &CardId) -> CardResult<Option<Card>> {
        Ok(self.read()?.get(card_id).cloned())
    }

    async fn list_all(&self) -> CardResult<Vec<Card>> {
        self.select(|_| true)
    }

    async fn list_by_owner(&self, user_id: &UserId) -> CardResult<Vec<Card>> {
        self.select(|c| &c.user_id == user_id)
    }

    async fn list_liked_by(&self, user_id: &UserId) -> CardResult<Vec<Card>> {
        self.select(|c| c.is_liked_by(user_id))
    }

    async fn list_in_cart_of(&self, user_id: &UserId) -> CardResult<Vec<Card>> {
        self.select(|c| c.is_in_cart_of(user_id))
    }

    async fn update_content(&self, card: &Card) -> CardResult<Option<Card>> {
        let mut cards = self.write()?;
        Ok(cards.get_mut(&card.card_id).map(|stored| {
            stored.content = card.content.clone();
            stored.updated_at = card.updated_at;
            stored.clone()
        }))
    }

    async fn delete(&self, card_id: &CardId) -> CardResult<Option<Card>> {
        Ok(self.write()?.remove(card_id))
    }

    async fn toggle_like(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<(Card, LikeState)>> {
        let mut cards = self.write()?;
        Ok(cards.get_mut(card_id).map(|card| {
            let state = card.toggle_like(*user_id);
            (card.clone(), state)
        }))
    }

    async fn add_to_cart(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<(Card, CartChange)>> {
        let mut cards = self.write()?;
        Ok(cards.get_mut(card_id).map(|card| {
            let change = card.add_to_cart(*user_id);
            (card.clone(), change)
        }))
    }

    async fn remove_from_cart(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<Card>> {
        let mut cards = self.write()?;
        Ok(cards.get_mut(card_id).map(|card| {
            card.remove_from_cart(user_id);
            card.clone()
        }))
    }
}
