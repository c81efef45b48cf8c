//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Blog, BlogDetails, Comment, CommentView};
use crate::domain::pagination::Page;

// ============================================================================
// Requests
// ============================================================================

/// `GET /blogs` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlogsQuery {
    pub category_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `GET /search` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `page` / `limit` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub comment: Option<String>,
    pub user_id: Option<String>,
    pub blog_id: Option<String>,
    pub username: Option<String>,
}

// ============================================================================
// Blogs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub user_id: Uuid,
    pub body: String,
    pub blog_image_path: Option<String>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.blog_id.into_uuid(),
            title: blog.title,
            user_id: blog.user_id.into_uuid(),
            body: blog.body,
            blog_image_path: blog.image_path,
            category_id: blog.category_id,
            created_at: blog.created_at,
        }
    }
}

/// Post joined with author and category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDetailsResponse {
    #[serde(flatten)]
    pub blog: BlogResponse,
    pub username: String,
    pub user_image_path: Option<String>,
    pub category_name: Option<String>,
}

impl From<BlogDetails> for BlogDetailsResponse {
    fn from(details: BlogDetails) -> Self {
        Self {
            blog: details.blog.into(),
            username: details.username,
            user_image_path: details.user_image_path,
            category_name: details.category_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogResponse {
    pub success: bool,
    pub message: String,
    pub blog: BlogResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlogResponse {
    pub success: bool,
    pub blog: BlogDetailsResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBlogResponse {
    pub success: bool,
    pub new_blog: BlogResponse,
}

/// Paginated listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPageResponse {
    pub success: bool,
    pub blogs: Vec<BlogResponse>,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl From<Page<Blog>> for BlogPageResponse {
    fn from(page: Page<Blog>) -> Self {
        let page = page.map(BlogResponse::from);
        Self {
            success: true,
            blogs: page.items,
            next_page: page.next_page,
            prev_page: page.prev_page,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blog_id: Uuid,
    pub comment: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            user_id: comment.user_id.into_uuid(),
            blog_id: comment.blog_id.into_uuid(),
            comment: comment.comment,
            username: comment.username,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentViewResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub user_image_path: Option<String>,
}

impl From<CommentView> for CommentViewResponse {
    fn from(view: CommentView) -> Self {
        Self {
            comment: view.comment.into(),
            user_image_path: view.user_image_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreatedResponse {
    pub success: bool,
    pub data: CommentResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentListResponse {
    pub success: bool,
    pub data: Vec<CommentViewResponse>,
}
