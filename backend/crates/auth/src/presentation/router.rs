//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Public routes: login, logout, register, refresh
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/register", post(handlers::register::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .with_state(state)
}

/// User lookups. Not protected here; wrap with
/// [`crate::presentation::middleware::protect`].
pub fn users_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/users/{id}", get(handlers::get_user::<R>))
        .with_state(state)
}
