//! Add Comment Use Case

use std::sync::Arc;

use kernel::id::{BlogId, UserId};
use kernel::validation::{required_id, required_text};

use crate::application::rejected;
use crate::domain::entity::Comment;
use crate::domain::repository::CommentRepository;
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Default)]
pub struct AddCommentInput {
    pub comment: Option<String>,
    pub user_id: Option<String>,
    pub blog_id: Option<String>,
    pub username: Option<String>,
}

pub struct AddCommentUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> AddCommentUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AddCommentInput) -> BlogResult<Comment> {
        let invalid = |e| rejected(e, BlogError::InvalidData);

        let user_id: UserId = required_id("userId", input.user_id.as_deref()).map_err(invalid)?;
        let blog_id: BlogId = required_id("blogId", input.blog_id.as_deref()).map_err(invalid)?;
        let comment = required_text("comment", input.comment.as_deref(), 3).map_err(invalid)?;
        let username = required_text("username", input.username.as_deref(), 3).map_err(invalid)?;

        let created = self
            .repo
            .insert_comment(&Comment::new(user_id, blog_id, comment, username))
            .await?
            .ok_or_else(|| BlogError::Internal("comment insert returned no row".to_string()))?;

        tracing::info!(
            comment_id = %created.comment_id,
            blog_id = %created.blog_id,
            "Comment added"
        );

        Ok(created)
    }
}
