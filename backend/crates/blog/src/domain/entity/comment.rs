//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, CommentId, UserId};

/// A comment on a post. `username` is a snapshot taken when it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub comment_id: CommentId,
    pub user_id: UserId,
    pub blog_id: BlogId,
    pub comment: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(user_id: UserId, blog_id: BlogId, comment: String, username: String) -> Self {
        Self {
            comment_id: CommentId::new(),
            user_id,
            blog_id,
            comment,
            username,
            created_at: Utc::now(),
        }
    }
}

/// Comment joined with the author's current profile picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub user_image_path: Option<String>,
}
