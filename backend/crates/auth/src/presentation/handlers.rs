//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use platform::cookie::{CookieConfig, delete_cookie_header, extract_cookie, set_cookie_header};
use platform::token::TokenIssuer;
use platform::upload::read_form;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    GetUserUseCase, LoginInput, LoginUseCase, LogoutOutcome, LogoutUseCase, RefreshUseCase,
    RegisterInput, RegisterUseCase, SessionOutput,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{GetUserResponse, LoginRequest, LogoutResponse, SessionResponse};

/// Shared state for auth handlers and the access-token middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, tokens: Arc<TokenIssuer>, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            tokens,
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register (multipart: username, email, password, image?)
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    multipart: Multipart,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let mut form = read_form(multipart, &state.config.avatar_upload).await?;

    let input = RegisterInput {
        username: form.text("username").map(str::to_string),
        email: form.text("email").map(str::to_string),
        password: form.text("password").map(str::to_string),
        image: form.take_image(),
    };

    let use_case = RegisterUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case.execute(input).await?;

    session_response(&state.config.refresh_cookie, StatusCode::CREATED, output)
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Login body rejected");
        AuthError::InvalidCredentials
    })?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    session_response(&state.config.refresh_cookie, StatusCode::OK, output)
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/refresh (cookie `jwt`)
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = extract_cookie(&headers, &state.config.refresh_cookie.name);

    let use_case = RefreshUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(cookie).await?;

    session_response(&state.config.refresh_cookie, StatusCode::OK, output)
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = extract_cookie(&headers, &state.config.refresh_cookie.name);

    let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.execute(cookie).await? {
        LogoutOutcome::NoSession => Ok(StatusCode::NO_CONTENT.into_response()),
        LogoutOutcome::Cleared => {
            let clear = delete_cookie_header(&state.config.refresh_cookie)
                .ok_or_else(|| AuthError::Internal("invalid clear-cookie header".to_string()))?;

            Ok((
                StatusCode::OK,
                [(header::SET_COOKIE, clear)],
                Json(LogoutResponse {
                    success: true,
                    message: "cookie cleared".to_string(),
                    token: None,
                }),
            )
                .into_response())
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<GetUserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetUserUseCase::new(state.repo.clone());
    let profile = use_case.execute(&id).await?;

    Ok(Json(GetUserResponse {
        success: true,
        user: profile.into(),
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn refresh_cookie(config: &CookieConfig, token: &str) -> AuthResult<HeaderValue> {
    set_cookie_header(config, token)
        .ok_or_else(|| AuthError::Internal("invalid refresh cookie header".to_string()))
}

/// JSON body `{success, user, token}`, plus the refresh cookie when a new
/// refresh token was issued
fn session_response(
    cookie: &CookieConfig,
    status: StatusCode,
    output: SessionOutput,
) -> AuthResult<Response> {
    let body = Json(SessionResponse {
        success: true,
        user: output.user.into(),
        token: output.access_token,
    });

    match output.refresh_token {
        Some(token) => {
            let cookie = refresh_cookie(cookie, &token)?;
            Ok((status, [(header::SET_COOKIE, cookie)], body).into_response())
        }
        None => Ok((status, body).into_response()),
    }
}
