//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use platform::upload::read_form;
use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::application::{
    AddCommentInput, AddCommentUseCase, CreateBlogInput, CreateBlogUseCase, EditBlogInput,
    EditBlogUseCase, GetBlogUseCase, ListBlogsInput, ListBlogsUseCase, ListCommentsUseCase,
    SearchBlogsInput, SearchBlogsUseCase, UserBlogsInput, UserBlogsUseCase,
};
use crate::domain::repository::{BlogRepository, CommentRepository};
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    AddCommentRequest, BlogPageResponse, CommentCreatedResponse, CommentListResponse,
    CreateBlogResponse, EditBlogResponse, GetBlogResponse, ListBlogsQuery, PageQuery, SearchQuery,
};

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<R>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BlogConfig>,
}

impl<R> BlogAppState<R>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: BlogConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

fn query_rejected(err: QueryRejection, as_error: BlogError) -> BlogError {
    tracing::debug!(error = %err, "Query string rejected");
    as_error
}

// ============================================================================
// Blogs
// ============================================================================

/// POST /api/blogs (multipart: title, userId, categoryId?, body, image?)
pub async fn create_blog<R>(
    State(state): State<BlogAppState<R>>,
    multipart: Multipart,
) -> BlogResult<(StatusCode, Json<CreateBlogResponse>)>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let mut form = read_form(multipart, &state.config.image_upload).await?;

    let input = CreateBlogInput {
        title: form.text("title").map(str::to_string),
        user_id: form.text("userId").map(str::to_string),
        category_id: form.text("categoryId").map(str::to_string),
        body: form.text("body").map(str::to_string),
        image: form.take_image(),
    };

    let blog = CreateBlogUseCase::new(state.repo.clone()).execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBlogResponse {
            success: true,
            message: "Blog post created successfully".to_string(),
            blog: blog.into(),
        }),
    ))
}

/// GET /api/blogs?categoryId&page&limit
pub async fn list_blogs<R>(
    State(state): State<BlogAppState<R>>,
    query: Result<Query<ListBlogsQuery>, QueryRejection>,
) -> BlogResult<Json<BlogPageResponse>>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|e| query_rejected(e, BlogError::InvalidQueries))?;

    let page = ListBlogsUseCase::new(state.repo.clone())
        .execute(ListBlogsInput {
            category_id: query.category_id,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(Json(page.into()))
}

/// GET /api/blogs/{id}
pub async fn get_blog<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> BlogResult<Json<GetBlogResponse>>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let details = GetBlogUseCase::new(state.repo.clone()).execute(&id).await?;

    Ok(Json(GetBlogResponse {
        success: true,
        blog: details.into(),
    }))
}

/// PUT /api/blogs/{id} (multipart: title, body, categoryId?, image?)
pub async fn edit_blog<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> BlogResult<Json<EditBlogResponse>>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let mut form = read_form(multipart, &state.config.image_upload).await?;

    let input = EditBlogInput {
        blog_id: id,
        title: form.text("title").map(str::to_string),
        body: form.text("body").map(str::to_string),
        category_id: form.text("categoryId").map(str::to_string),
        image: form.take_image(),
    };

    let blog = EditBlogUseCase::new(state.repo.clone()).execute(input).await?;

    Ok(Json(EditBlogResponse {
        success: true,
        new_blog: blog.into(),
    }))
}

/// GET /api/search?query&page&limit
pub async fn search_blogs<R>(
    State(state): State<BlogAppState<R>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> BlogResult<Json<BlogPageResponse>>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|e| query_rejected(e, BlogError::InvalidSearch))?;

    let page = SearchBlogsUseCase::new(state.repo.clone())
        .execute(SearchBlogsInput {
            query: query.query,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(Json(page.into()))
}

/// GET /api/users/blogs/{id}?page&limit
pub async fn user_blogs<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> BlogResult<Json<BlogPageResponse>>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|e| query_rejected(e, BlogError::InvalidData))?;

    let page = UserBlogsUseCase::new(state.repo.clone())
        .execute(UserBlogsInput {
            user_id: id,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(Json(page.into()))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/comments
pub async fn add_comment<R>(
    State(state): State<BlogAppState<R>>,
    payload: Result<Json<AddCommentRequest>, JsonRejection>,
) -> BlogResult<Json<CommentCreatedResponse>>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Comment body rejected");
        BlogError::InvalidData
    })?;

    let comment = AddCommentUseCase::new(state.repo.clone())
        .execute(AddCommentInput {
            comment: req.comment,
            user_id: req.user_id,
            blog_id: req.blog_id,
            username: req.username,
        })
        .await?;

    Ok(Json(CommentCreatedResponse {
        success: true,
        data: comment.into(),
    }))
}

/// GET /api/blogs/{id}/comments
pub async fn list_comments<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> BlogResult<Json<CommentListResponse>>
where
    R: BlogRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let comments = ListCommentsUseCase::new(state.repo.clone()).execute(&id).await?;

    Ok(Json(CommentListResponse {
        success: true,
        data: comments.into_iter().map(Into::into).collect(),
    }))
}
