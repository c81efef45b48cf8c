//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, pagination, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Posts with an optional cover image (multipart upload)
//! - Paginated listing by category, by author, and by search term
//! - Comments
//!
//! Uploaded images that belong to a failed request are removed before the
//! error is returned.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::BlogConfig;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::{blog_router, blog_router_generic};
