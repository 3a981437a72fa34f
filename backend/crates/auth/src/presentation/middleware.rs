//! Auth Middleware
//!
//! Resolves the session token on every request and exposes the signed-in
//! user as a [`Principal`] in request extensions. Anonymous requests pass
//! through untouched; handlers that need a user extract `Principal` and
//! reject with 401 themselves.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use kernel::principal::Principal;
use platform::client::ClientFingerprint;
use platform::cookie::extract_session_token;

use crate::application::CheckSessionUseCase;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Fingerprint of the calling client
///
/// Works with or without `ConnectInfo` (absent in router tests).
pub struct Client(pub ClientFingerprint);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Client(fingerprint_of(parts)))
    }
}

fn fingerprint_of(parts: &Parts) -> ClientFingerprint {
    let direct_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    ClientFingerprint::from_headers(&parts.headers, direct_ip)
}

/// Attach a [`Principal`] for requests carrying a valid session
pub async fn attach_principal<R>(
    State(state): State<AuthAppState<R>>,
    req: Request,
    next: Next,
) -> Response
where
    R: AuthSessionRepository + Send + Sync + 'static,
{
    let (mut parts, body) = req.into_parts();

    if let Some(token) = extract_session_token(&parts.headers, state.config.cookie_name()) {
        let fingerprint = fingerprint_of(&parts);
        let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

        match use_case.get_session(&token, &fingerprint.hash).await {
            Ok(session) => {
                parts.extensions.insert(session.principal());
            }
            Err(AuthError::SessionInvalid) => {
                tracing::debug!("Ignoring invalid session token");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed");
            }
        }
    }

    next.run(Request::from_parts(parts, body)).await
}
