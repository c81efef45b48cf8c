//! Blog Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::BlogConfig;
use crate::domain::repository::{BlogRepository, CommentRepository};
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the blog router with PostgreSQL repository
pub fn blog_router(repo: PgBlogRepository, config: BlogConfig) -> Router {
    blog_router_generic(BlogAppState::new(repo, config))
}

/// Blog, search, comment and per-user listing routes. None of them check
/// credentials; the caller layers authentication on top.
pub fn blog_router_generic<R>(state: BlogAppState<R>) -> Router
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/blogs",
            post(handlers::create_blog::<R>).get(handlers::list_blogs::<R>),
        )
        .route(
            "/blogs/{id}",
            get(handlers::get_blog::<R>).put(handlers::edit_blog::<R>),
        )
        .route("/blogs/{id}/comments", get(handlers::list_comments::<R>))
        .route("/comments", post(handlers::add_comment::<R>))
        .route("/search", get(handlers::search_blogs::<R>))
        .route("/users/blogs/{id}", get(handlers::user_blogs::<R>))
        .with_state(state)
}
