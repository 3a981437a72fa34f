//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{CardId, UserId};

use crate::domain::value_objects::{BizNumber, CardContent};

/// A business card
#[derive(Debug, Clone)]
pub struct Card {
    pub card_id: CardId,
    /// Publishing user
    pub user_id: UserId,
    pub biz_number: BizNumber,
    pub content: CardContent,
    pub likes: Vec<UserId>,
    pub add_to_cart: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    Unliked,
}

/// Result of adding a card to a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added,
    AlreadyPresent,
}

impl Card {
    pub fn new(user_id: UserId, biz_number: BizNumber, content: CardContent) -> Self {
        let now = Utc::now();
        Self {
            card_id: CardId::new(),
            user_id,
            biz_number,
            content,
            likes: Vec::new(),
            add_to_cart: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likes.contains(user_id)
    }

    pub fn is_in_cart_of(&self, user_id: &UserId) -> bool {
        self.add_to_cart.contains(user_id)
    }

    /// Remove the user from `likes` if present, otherwise append
    pub fn toggle_like(&mut self, user_id: UserId) -> LikeState {
        self.updated_at = Utc::now();
        if self.is_liked_by(&user_id) {
            self.likes.retain(|id| id != &user_id);
            LikeState::Unliked
        } else {
            self.likes.push(user_id);
            LikeState::Liked
        }
    }

    pub fn add_to_cart(&mut self, user_id: UserId) -> CartChange {
        if self.is_in_cart_of(&user_id) {
            return CartChange::AlreadyPresent;
        }
        self.add_to_cart.push(user_id);
        self.updated_at = Utc::now();
        CartChange::Added
    }

    /// No-op when the user has no such cart entry
    pub fn remove_from_cart(&mut self, user_id: &UserId) {
        if self.is_in_cart_of(user_id) {
            self.add_to_cart.retain(|id| id != user_id);
            self.updated_at = Utc::now();
        }
    }

    pub fn replace_content(&mut self, content: CardContent) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}
