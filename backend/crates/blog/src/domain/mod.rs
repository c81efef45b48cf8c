//! Domain Layer
//!
//! Entities, pagination and repository traits.

pub mod entity;
pub mod pagination;
pub mod repository;

pub use entity::{Blog, BlogChanges, BlogDetails, BlogFilter, Comment, CommentView};
pub use pagination::{Page, PageRequest};
pub use repository::{BlogRepository, CommentRepository};
