//! Search Blogs Use Case
//!
//! Matches the query against post titles and author usernames.

use std::sync::Arc;

use crate::application::{fetch_page, rejected};
use crate::domain::entity::{Blog, BlogFilter};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Default)]
pub struct SearchBlogsInput {
    pub query: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub struct SearchBlogsUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> SearchBlogsUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// An empty query matches every post
    pub async fn execute(&self, input: SearchBlogsInput) -> BlogResult<Page<Blog>> {
        let query = input.query.ok_or(BlogError::InvalidSearch)?;
        let request = PageRequest::parse(input.page.as_deref(), input.limit.as_deref())
            .map_err(|e| rejected(e, BlogError::InvalidSearch))?;

        let filter = BlogFilter::Search(query.trim().to_string());

        fetch_page(self.repo.as_ref(), filter, request, "Could not find the blog").await
    }
}
