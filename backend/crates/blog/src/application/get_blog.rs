//! Get Blog Use Case

use std::sync::Arc;

use kernel::id::BlogId;

use crate::domain::entity::BlogDetails;
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};

pub struct GetBlogUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> GetBlogUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, raw_id: &str) -> BlogResult<BlogDetails> {
        let blog_id = BlogId::parse_v4(raw_id).ok_or(BlogError::InvalidParams)?;

        self.repo
            .find_blog_details(&blog_id)
            .await?
            .ok_or(BlogError::NotFound("Could not find the intended blog"))
    }
}
