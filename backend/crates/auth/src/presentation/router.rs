//! Users Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::AuthSessionRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthStore};
use crate::presentation::middleware::attach_principal;

/// `/api/users` routes backed by PostgreSQL
pub fn users_router(state: AuthAppState<PgAuthRepository>) -> Router {
    users_router_generic(state)
}

/// `/api/users` routes for any repository implementation
pub fn users_router_generic<R: AuthStore>(state: AuthAppState<R>) -> Router {
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/status", get(handlers::session_status::<R>))
        .route("/me", get(handlers::me::<R>))
        .with_state(state)
}

/// Run [`attach_principal`] in front of every route of `router`
pub fn authenticate<R>(router: Router, state: AuthAppState<R>) -> Router
where
    R: AuthSessionRepository + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(state, attach_principal::<R>))
}
