//! Create Blog Use Case

use std::sync::Arc;

use kernel::id::UserId;
use kernel::validation::{optional_int, required_id, required_text};
use platform::upload::{StagedFile, discard_on_error};

use crate::application::rejected;
use crate::domain::entity::Blog;
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};

/// Form fields as they arrived
pub struct CreateBlogInput {
    pub title: Option<String>,
    pub user_id: Option<String>,
    pub category_id: Option<String>,
    pub body: Option<String>,
    pub image: Option<StagedFile>,
}

pub struct CreateBlogUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> CreateBlogUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The staged image is discarded if the post is not created
    pub async fn execute(&self, input: CreateBlogInput) -> BlogResult<Blog> {
        let staged = input.image.clone();
        discard_on_error(staged, self.create(input).await).await
    }

    async fn create(&self, input: CreateBlogInput) -> BlogResult<Blog> {
        let invalid = |e| rejected(e, BlogError::InvalidData);

        let title = required_text("title", input.title.as_deref(), 3).map_err(invalid)?;
        let user_id: UserId = required_id("userId", input.user_id.as_deref()).map_err(invalid)?;
        let body = required_text("body", input.body.as_deref(), 3).map_err(invalid)?;
        let category_id = optional_int("categoryId", input.category_id.as_deref()).map_err(invalid)?;

        let blog = Blog::new(
            title,
            user_id,
            body,
            input.image.as_ref().map(StagedFile::stored_path),
            category_id,
        );

        let created = self
            .repo
            .insert_blog(&blog)
            .await?
            .ok_or_else(|| BlogError::Internal("blog insert returned no row".to_string()))?;

        tracing::info!(
            blog_id = %created.blog_id,
            user_id = %created.user_id,
            has_image = created.image_path.is_some(),
            "Blog created"
        );

        Ok(created)
    }
}
