//! Application Layer
//!
//! Use cases and application services.

pub mod add_comment;
pub mod config;
pub mod create_blog;
pub mod edit_blog;
pub mod get_blog;
pub mod list_blogs;
pub mod list_comments;
pub mod search_blogs;
pub mod user_blogs;

use kernel::validation::ValidationError;

use crate::domain::entity::{Blog, BlogFilter};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repository::BlogRepository;
use crate::error::{BlogError, BlogResult};

// Re-exports
pub use add_comment::{AddCommentInput, AddCommentUseCase};
pub use config::BlogConfig;
pub use create_blog::{CreateBlogInput, CreateBlogUseCase};
pub use edit_blog::{EditBlogInput, EditBlogUseCase};
pub use get_blog::GetBlogUseCase;
pub use list_blogs::{ListBlogsInput, ListBlogsUseCase};
pub use list_comments::ListCommentsUseCase;
pub use search_blogs::{SearchBlogsInput, SearchBlogsUseCase};
pub use user_blogs::{UserBlogsInput, UserBlogsUseCase};

/// Fetch one page for `filter`. An empty page is reported as `NotFound`
/// with `empty_message`.
async fn fetch_page<R>(
    repo: &R,
    filter: BlogFilter,
    request: PageRequest,
    empty_message: &'static str,
) -> BlogResult<Page<Blog>>
where
    R: BlogRepository,
{
    let items = repo.list_blogs(&filter, &request).await?;
    if items.is_empty() {
        return Err(BlogError::NotFound(empty_message));
    }

    let total = repo.count_blogs(&filter).await?;
    Ok(Page::new(items, total, request))
}

fn rejected(err: ValidationError, as_error: BlogError) -> BlogError {
    tracing::debug!(field = err.field(), reason = %err, "Blog input rejected");
    as_error
}
