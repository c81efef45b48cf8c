//! Edit Blog Use Case
//!
//! Replaces title, body and category. A newly uploaded image replaces the
//! stored one, and the previous file is removed only once the update has
//! been written.

use std::sync::Arc;

use kernel::id::BlogId;
use kernel::validation::{optional_int, required_text};
use platform::upload::{StagedFile, discard_on_error, remove_quietly};

use crate::application::rejected;
use crate::domain::entity::{Blog, BlogChanges};
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};

pub struct EditBlogInput {
    pub blog_id: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category_id: Option<String>,
    pub image: Option<StagedFile>,
}

pub struct EditBlogUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> EditBlogUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The staged image is discarded if the edit fails at any step
    pub async fn execute(&self, input: EditBlogInput) -> BlogResult<Blog> {
        let staged = input.image.clone();
        discard_on_error(staged, self.edit(input).await).await
    }

    async fn edit(&self, input: EditBlogInput) -> BlogResult<Blog> {
        let invalid = |e| rejected(e, BlogError::InvalidData);

        let blog_id = BlogId::parse_v4(&input.blog_id).ok_or(BlogError::InvalidData)?;
        let title = required_text("title", input.title.as_deref(), 3).map_err(invalid)?;
        let body = required_text("body", input.body.as_deref(), 3).map_err(invalid)?;
        let category_id = optional_int("categoryId", input.category_id.as_deref()).map_err(invalid)?;

        let previous = self
            .repo
            .find_blog(&blog_id)
            .await?
            .ok_or(BlogError::NotFound("blog could not be found"))?;

        let changes = BlogChanges {
            title,
            body,
            category_id,
            image_path: input.image.as_ref().map(StagedFile::stored_path),
        };

        let updated = self
            .repo
            .update_blog(&blog_id, &changes)
            .await?
            .ok_or(BlogError::UpdateFailed)?;

        if let (Some(new_path), Some(old_path)) = (&changes.image_path, &previous.image_path) {
            if new_path != old_path {
                remove_quietly(old_path).await;
            }
        }

        tracing::info!(
            blog_id = %updated.blog_id,
            image_replaced = changes.image_path.is_some(),
            "Blog edited"
        );

        Ok(updated)
    }
}
