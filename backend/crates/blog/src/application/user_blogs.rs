//! User Blogs Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::{fetch_page, rejected};
use crate::domain::entity::{Blog, BlogFilter};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Default)]
pub struct UserBlogsInput {
    pub user_id: String,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub struct UserBlogsUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> UserBlogsUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: UserBlogsInput) -> BlogResult<Page<Blog>> {
        let user_id = UserId::parse_v4(&input.user_id).ok_or(BlogError::InvalidParams)?;
        let request = PageRequest::parse(input.page.as_deref(), input.limit.as_deref())
            .map_err(|e| rejected(e, BlogError::InvalidData))?;

        fetch_page(
            self.repo.as_ref(),
            BlogFilter::Author(user_id),
            request,
            "Could not find more blogs",
        )
        .await
    }
}
