//! Data Transfer Objects
//!
//! JSON shapes of the `/api/cards` endpoints. Server-owned fields (`_id`,
//! `userId`, `bizNumber`, `likes`, `addToCart`, `createdAt`) are output only;
//! request bodies that carry them are accepted and the values ignored.

use chrono::{DateTime, Utc};
use kernel::{
    contact::{Address, Image},
    id::{CardId, UserId},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::update_card::CardPatch;
use crate::domain::entities::Card;
use crate::domain::value_objects::{BizNumber, CardDraft, Price};

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /api/cards`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub web: Option<String>,
    #[serde(default)]
    pub image: Image,
    pub address: Address,
    #[serde(default)]
    pub price: Option<Price>,
}

impl From<CardRequest> for CardDraft {
    fn from(req: CardRequest) -> Self {
        CardDraft {
            title: req.title,
            subtitle: req.subtitle,
            description: req.description,
            phone: req.phone,
            email: req.email,
            web: req.web,
            image: req.image,
            address: req.address,
            price: req.price,
        }
    }
}

/// Body of `PUT /api/cards/{id}`; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub web: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub address: Option<Address>,
    /// Missing keeps the price, `null` clears it
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<Price>>,
}

/// Marks a key as present even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<CardUpdateRequest> for CardPatch {
    fn from(req: CardUpdateRequest) -> Self {
        CardPatch {
            title: req.title,
            subtitle: req.subtitle,
            description: req.description,
            phone: req.phone,
            email: req.email,
            web: req.web,
            image: req.image,
            address: req.address,
            price: req.price,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    #[serde(rename = "_id")]
    pub id: CardId,
    pub user_id: UserId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    pub image: Image,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    pub biz_number: BizNumber,
    pub likes: Vec<UserId>,
    pub add_to_cart: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        let content = card.content;
        Self {
            id: card.card_id,
            user_id: card.user_id,
            title: content.title,
            subtitle: content.subtitle,
            description: content.description,
            phone: content.phone.as_str().to_string(),
            email: content.email.as_str().to_string(),
            web: content.web,
            image: content.image,
            address: content.address,
            price: content.price,
            biz_number: card.biz_number,
            likes: card.likes,
            add_to_cart: card.add_to_cart,
            created_at: card.created_at,
        }
    }
}

/// `POST /api/cards`
#[derive(Debug, Serialize)]
pub struct CreatedCardResponse {
    pub card: CardResponse,
}

/// `DELETE /api/cards/{id}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCardResponse {
    pub message: String,
    pub deleted_card: CardResponse,
}

/// Like and cart endpoints
#[derive(Debug, Serialize)]
pub struct CardMessageResponse {
    pub message: String,
    pub card: CardResponse,
}

pub fn card_list(cards: Vec<Card>) -> Vec<CardResponse> {
    cards.into_iter().map(CardResponse::from).collect()
}
