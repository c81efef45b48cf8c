//! List Comments Use Case

use std::sync::Arc;

use kernel::id::BlogId;

use crate::domain::entity::CommentView;
use crate::domain::repository::CommentRepository;
use crate::error::{BlogError, BlogResult};

pub struct ListCommentsUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> ListCommentsUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, raw_blog_id: &str) -> BlogResult<Vec<CommentView>> {
        let blog_id = BlogId::parse_v4(raw_blog_id).ok_or(BlogError::InvalidParams)?;

        let comments = self.repo.comments_for_blog(&blog_id).await?;
        if comments.is_empty() {
            return Err(BlogError::NotFound("no comments found"));
        }

        Ok(comments)
    }
}
