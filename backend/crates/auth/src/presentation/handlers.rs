//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::extract::AppJson;
use kernel::principal::Principal;
use platform::cookie::extract_session_token;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, CurrentUserUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{
    AuthRepository, AuthSessionRepository, UserDetailsRepository, UserRepository,
};
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SessionStatusResponse,
    UserProfileResponse,
};
use crate::presentation::middleware::Client;

/// Every repository trait the auth routes need
pub trait AuthStore:
    UserRepository
    + UserDetailsRepository
    + AuthRepository
    + AuthSessionRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository
        + UserDetailsRepository
        + AuthRepository
        + AuthSessionRepository
        + Send
        + Sync
        + 'static
{
}

/// Shared state for auth handlers and the principal middleware
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/users/register
pub async fn register<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)> {
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(SignUpInput {
            first_name: req.name.first,
            middle_name: req.name.middle,
            last_name: req.name.last,
            phone: req.phone,
            email: req.email,
            password: req.password,
            image: req.image,
            address: req.address,
            is_business: req.is_business,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
            email: output.email.as_str().to_string(),
            is_business: output.is_business,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/users/login
pub async fn login<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    Client(fingerprint): Client,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<Response> {
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(
            SignInInput {
                email: req.email,
                password: req.password,
                remember_me: req.remember_me,
            },
            fingerprint,
        )
        .await?;

    let body = Json(LoginResponse {
        user_id: output.user_id,
        token: output.session_token.clone(),
        is_business: output.role.is_business,
        is_admin: output.role.is_admin,
    });

    match state
        .config
        .cookie
        .set_cookie_header(&output.session_token, output.max_age_secs)
    {
        Some(cookie) => Ok(([(header::SET_COOKIE, cookie)], body).into_response()),
        None => Ok(body.into_response()),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/users/logout
pub async fn logout<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = extract_session_token(&headers, state.config.cookie_name()) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared whatever happens to the session row
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Logout with unusable session token");
        }
    }

    match state.config.cookie.delete_cookie_header() {
        Some(cookie) => (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/users/status
pub async fn session_status<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    Client(fingerprint): Client,
    headers: HeaderMap,
) -> Json<SessionStatusResponse> {
    let Some(token) = extract_session_token(&headers, state.config.cookie_name()) else {
        return Json(SessionStatusResponse::default());
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    match use_case.get_session(&token, &fingerprint.hash).await {
        Ok(session) => Json(SessionStatusResponse {
            authenticated: true,
            user_id: Some(session.user_id),
            is_business: Some(session.role.is_business),
            is_admin: Some(session.role.is_admin),
            expires_at_ms: Some(session.expires_at_ms),
        }),
        Err(_) => Json(SessionStatusResponse::default()),
    }
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/users/me
pub async fn me<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    principal: Principal,
) -> AuthResult<Json<UserProfileResponse>> {
    let current = CurrentUserUseCase::new(state.repo.clone())
        .execute(&principal.user_id)
        .await?;
    Ok(Json(current.into()))
}
