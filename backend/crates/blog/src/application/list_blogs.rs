//! List Blogs Use Case
//!
//! All posts, or the posts of one category, oldest first.

use std::sync::Arc;

use kernel::validation::optional_int;

use crate::application::{fetch_page, rejected};
use crate::domain::entity::{Blog, BlogFilter};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};

/// Query string values as they arrived
#[derive(Debug, Default)]
pub struct ListBlogsInput {
    pub category_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub struct ListBlogsUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> ListBlogsUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ListBlogsInput) -> BlogResult<Page<Blog>> {
        let invalid = |e| rejected(e, BlogError::InvalidQueries);

        let category_id = optional_int("categoryId", input.category_id.as_deref()).map_err(invalid)?;
        let request =
            PageRequest::parse(input.page.as_deref(), input.limit.as_deref()).map_err(invalid)?;

        let filter = match category_id {
            Some(id) => BlogFilter::Category(id),
            None => BlogFilter::All,
        };

        fetch_page(self.repo.as_ref(), filter, request, "Couldn't find the intended blogs").await
    }
}
