//! Auth Middleware
//!
//! Bearer access-token check for protected routes.

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

pub use crate::application::CurrentUser;

/// Middleware that requires a valid access token.
///
/// On success the [`CurrentUser`] is available to handlers through
/// `Extension<CurrentUser>`.
pub async fn require_access_token<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());
    let current_user = use_case.execute(authorization.as_deref()).await?;

    tracing::debug!(user_id = %current_user.user_id, "Access token accepted");
    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

/// Put every route of `router` behind [`require_access_token`]
pub fn protect<R>(router: Router, state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(state, require_access_token::<R>))
}
