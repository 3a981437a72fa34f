//! Cards Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::infra::postgres::PgCardRepository;
use crate::presentation::handlers::{self, CardStore, CardsAppState};

/// `/api/cards` routes backed by PostgreSQL
pub fn cards_router(state: CardsAppState<PgCardRepository>) -> Router {
    cards_router_generic(state)
}

/// `/api/cards` routes for any repository implementation
///
/// Expects the auth middleware to have attached a `Principal` for the
/// routes that need one.
pub fn cards_router_generic<R: CardStore>(state: CardsAppState<R>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_cards::<R>).post(handlers::create_card::<R>),
        )
        .route("/my-cards", get(handlers::my_cards::<R>))
        .route("/favorites", get(handlers::favorite_cards::<R>))
        .route("/cart", get(handlers::cart_cards::<R>))
        .route(
            "/{id}",
            get(handlers::get_card::<R>)
                .put(handlers::update_card::<R>)
                .patch(handlers::toggle_like::<R>)
                .delete(handlers::delete_card::<R>),
        )
        .route(
            "/{id}/add-to-cart",
            post(handlers::add_to_cart::<R>).delete(handlers::remove_from_cart::<R>),
        )
        .with_state(state)
}
