//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::BlogId;

use crate::domain::entity::{Blog, BlogChanges, BlogDetails, BlogFilter, Comment, CommentView};
use crate::domain::pagination::PageRequest;
use crate::error::BlogResult;

/// Blog post storage
#[trait_variant::make(BlogRepository: Send)]
pub trait LocalBlogRepository {
    /// Insert a post; `None` when nothing was written
    async fn insert_blog(&self, blog: &Blog) -> BlogResult<Option<Blog>>;

    async fn find_blog(&self, blog_id: &BlogId) -> BlogResult<Option<Blog>>;

    /// Post joined with author and category
    async fn find_blog_details(&self, blog_id: &BlogId) -> BlogResult<Option<BlogDetails>>;

    /// One page of posts matching `filter`, oldest first
    async fn list_blogs(&self, filter: &BlogFilter, page: &PageRequest) -> BlogResult<Vec<Blog>>;

    async fn count_blogs(&self, filter: &BlogFilter) -> BlogResult<i64>;

    /// Apply `changes`; `None` when the post no longer exists
    async fn update_blog(&self, blog_id: &BlogId, changes: &BlogChanges) -> BlogResult<Option<Blog>>;
}

/// Comment storage
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn insert_comment(&self, comment: &Comment) -> BlogResult<Option<Comment>>;

    /// Comments on a post, oldest first
    async fn comments_for_blog(&self, blog_id: &BlogId) -> BlogResult<Vec<CommentView>>;
}
