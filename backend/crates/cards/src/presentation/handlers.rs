//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use kernel::error::app_error::AppError;
use kernel::extract::AppJson;
use kernel::id::CardId;
use kernel::principal::Principal;

use crate::application::config::CardsConfig;
use crate::application::{
    CreateCardUseCase, DeleteCardUseCase, EngagementUseCase, QueryCardsUseCase,
    UpdateCardUseCase,
};
use crate::domain::entities::{CartChange, LikeState};
use crate::domain::repository::CardRepository;
use crate::domain::services::ensure_publisher;
use crate::error::CardResult;
use crate::presentation::dto::{
    CardMessageResponse, CardRequest, CardResponse, CardUpdateRequest, CreatedCardResponse,
    DeletedCardResponse, card_list,
};

/// Repository bound shared by every card route
pub trait CardStore: CardRepository + Send + Sync + 'static {}

impl<T> CardStore for T where T: CardRepository + Send + Sync + 'static {}

/// Shared state for card handlers
pub struct CardsAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<CardsConfig>,
}

impl<R> CardsAppState<R> {
    pub fn new(repo: R, config: CardsConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

impl<R> Clone for CardsAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

fn card_id(raw: &str) -> CardResult<CardId> {
    Ok(CardId::parse_str(raw)?)
}

/// POST /api/cards
pub async fn create_card<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
    body: Result<AppJson<CardRequest>, AppError>,
) -> CardResult<Json<CreatedCardResponse>> {
    // A non-publisher gets 401 even when the body is malformed
    ensure_publisher(&principal)?;
    let AppJson(req) = body?;

    let use_case = CreateCardUseCase::new(state.repo.clone(), state.config.clone());
    let card = use_case.execute(&principal, req.into()).await?;

    Ok(Json(CreatedCardResponse { card: card.into() }))
}

/// PUT /api/cards/{id}
pub async fn update_card<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
    AppJson(req): AppJson<CardUpdateRequest>,
) -> CardResult<Json<CardResponse>> {
    let card_id = card_id(&id)?;
    let use_case = UpdateCardUseCase::new(state.repo.clone(), state.config.clone());
    let card = use_case.execute(&principal, &card_id, req.into()).await?;

    Ok(Json(card.into()))
}

/// GET /api/cards
pub async fn list_cards<R: CardStore>(
    State(state): State<CardsAppState<R>>,
) -> CardResult<Json<Vec<CardResponse>>> {
    let cards = QueryCardsUseCase::new(state.repo.clone()).all().await?;
    Ok(Json(card_list(cards)))
}

/// GET /api/cards/my-cards
pub async fn my_cards<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
) -> CardResult<Json<Vec<CardResponse>>> {
    let cards = QueryCardsUseCase::new(state.repo.clone())
        .my_cards(&principal)
        .await?;
    Ok(Json(card_list(cards)))
}

/// GET /api/cards/favorites
pub async fn favorite_cards<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
) -> CardResult<Json<Vec<CardResponse>>> {
    let cards = QueryCardsUseCase::new(state.repo.clone())
        .favorites(&principal)
        .await?;
    Ok(Json(card_list(cards)))
}

/// GET /api/cards/cart
pub async fn cart_cards<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
) -> CardResult<Json<Vec<CardResponse>>> {
    let cards = QueryCardsUseCase::new(state.repo.clone())
        .cart(&principal)
        .await?;
    Ok(Json(card_list(cards)))
}

/// GET /api/cards/{id}
pub async fn get_card<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    Path(id): Path<String>,
) -> CardResult<Json<CardResponse>> {
    let card_id = card_id(&id)?;
    let card = QueryCardsUseCase::new(state.repo.clone())
        .by_id(&card_id)
        .await?;
    Ok(Json(card.into()))
}

/// DELETE /api/cards/{id}
pub async fn delete_card<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> CardResult<Json<DeletedCardResponse>> {
    let card_id = card_id(&id)?;
    let deleted = DeleteCardUseCase::new(state.repo.clone())
        .execute(&principal, &card_id)
        .await?;

    Ok(Json(DeletedCardResponse {
        message: "Card deleted successfully".to_string(),
        deleted_card: deleted.into(),
    }))
}

/// PATCH /api/cards/{id}
pub async fn toggle_like<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> CardResult<Json<CardMessageResponse>> {
    let card_id = card_id(&id)?;
    let (card, like) = EngagementUseCase::new(state.repo.clone())
        .toggle_like(&principal, &card_id)
        .await?;

    let message = match like {
        LikeState::Liked => format!("Card {card_id} liked by the user"),
        LikeState::Unliked => format!("Card {card_id} un-liked by the user"),
    };
    Ok(Json(CardMessageResponse {
        message,
        card: card.into(),
    }))
}

/// POST /api/cards/{id}/add-to-cart
pub async fn add_to_cart<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> CardResult<Json<CardMessageResponse>> {
    let card_id = card_id(&id)?;
    let (card, change) = EngagementUseCase::new(state.repo.clone())
        .add_to_cart(&principal, &card_id)
        .await?;

    let message = match change {
        CartChange::Added => format!("Card {card_id} added to the user's cart"),
        CartChange::AlreadyPresent => format!("Card {card_id} is already in the user's cart"),
    };
    Ok(Json(CardMessageResponse {
        message,
        card: card.into(),
    }))
}

/// DELETE /api/cards/{id}/add-to-cart
pub async fn remove_from_cart<R: CardStore>(
    State(state): State<CardsAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> CardResult<Json<CardMessageResponse>> {
    let card_id = card_id(&id)?;
    let card = EngagementUseCase::new(state.repo.clone())
        .remove_from_cart(&principal, &card_id)
        .await?;

    Ok(Json(CardMessageResponse {
        message: format!("Card {card_id} removed from the user's cart"),
        card: card.into(),
    }))
}
