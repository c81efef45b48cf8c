//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, CommentId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{Blog, BlogChanges, BlogDetails, BlogFilter, Comment, CommentView};
use crate::domain::pagination::PageRequest;
use crate::domain::repository::{BlogRepository, CommentRepository};
use crate::error::BlogResult;

const BLOG_COLUMNS: &str =
    "b.id, b.title, b.user_id, b.body, b.image_path, b.category_id, b.created_at";

/// PostgreSQL-backed blog and comment repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `%query%` with LIKE metacharacters in `query` matched literally
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append the WHERE clause for `filter`. Posts are always joined with
/// their author as `u`.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &BlogFilter) {
    match filter {
        BlogFilter::All => {}
        BlogFilter::Category(category_id) => {
            qb.push(" WHERE b.category_id = ").push_bind(*category_id);
        }
        BlogFilter::Author(user_id) => {
            qb.push(" WHERE b.user_id = ").push_bind(*user_id.as_uuid());
        }
        BlogFilter::Search(query) => {
            let pattern = like_pattern(query);
            qb.push(" WHERE b.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.username ILIKE ")
                .push_bind(pattern);
        }
    }
}

// ============================================================================
// Blog Repository Implementation
// ============================================================================

impl BlogRepository for PgBlogRepository {
    async fn insert_blog(&self, blog: &Blog) -> BlogResult<Option<Blog>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (id, title, user_id, body, image_path, category_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, user_id, body, image_path, category_id, created_at
            "#,
        )
        .bind(blog.blog_id.as_uuid())
        .bind(&blog.title)
        .bind(blog.user_id.as_uuid())
        .bind(&blog.body)
        .bind(blog.image_path.as_deref())
        .bind(blog.category_id)
        .bind(blog.created_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogRow::into_blog))
    }

    async fn find_blog(&self, blog_id: &BlogId) -> BlogResult<Option<Blog>> {
        let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs b WHERE b.id = $1");
        let row = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(blog_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BlogRow::into_blog))
    }

    async fn find_blog_details(&self, blog_id: &BlogId) -> BlogResult<Option<BlogDetails>> {
        let sql = format!(
            r#"
            SELECT {BLOG_COLUMNS},
                   u.username,
                   u.image_path AS user_image_path,
                   c.name AS category_name
            FROM blogs b
            JOIN users u ON u.id = b.user_id
            LEFT JOIN categories c ON c.id = b.category_id
            WHERE b.id = $1
            "#
        );
        let row = sqlx::query_as::<_, BlogDetailsRow>(&sql)
            .bind(blog_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BlogDetailsRow::into_details))
    }

    async fn list_blogs(&self, filter: &BlogFilter, page: &PageRequest) -> BlogResult<Vec<Blog>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {BLOG_COLUMNS} FROM blogs b JOIN users u ON u.id = b.user_id"
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY b.created_at, b.id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = qb
            .build_query_as::<BlogRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BlogRow::into_blog).collect())
    }

    async fn count_blogs(&self, filter: &BlogFilter) -> BlogResult<i64> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM blogs b JOIN users u ON u.id = b.user_id",
        );
        push_filter(&mut qb, filter);

        let count = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn update_blog(&self, blog_id: &BlogId, changes: &BlogChanges) -> BlogResult<Option<Blog>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET title = $1,
                body = $2,
                category_id = $3,
                image_path = COALESCE($4, image_path)
            WHERE id = $5
            RETURNING id, title, user_id, body, image_path, category_id, created_at
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.body)
        .bind(changes.category_id)
        .bind(changes.image_path.as_deref())
        .bind(blog_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogRow::into_blog))
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBlogRepository {
    async fn insert_comment(&self, comment: &Comment) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (id, user_id, blog_id, comment, username, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, blog_id, comment, username, created_at
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.user_id.as_uuid())
        .bind(comment.blog_id.as_uuid())
        .bind(&comment.comment)
        .bind(&comment.username)
        .bind(comment.created_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn comments_for_blog(&self, blog_id: &BlogId) -> BlogResult<Vec<CommentView>> {
        let rows = sqlx::query_as::<_, CommentViewRow>(
            r#"
            SELECT cm.id, cm.user_id, cm.blog_id, cm.comment, cm.username, cm.created_at,
                   u.image_path AS user_image_path
            FROM comments cm
            JOIN users u ON u.id = cm.user_id
            WHERE cm.blog_id = $1
            ORDER BY cm.created_at
            "#,
        )
        .bind(blog_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentViewRow::into_view).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    title: String,
    user_id: Uuid,
    body: String,
    image_path: Option<String>,
    category_id: Option<i32>,
    created_at: DateTime<Utc>,
}

impl BlogRow {
    fn into_blog(self) -> Blog {
        Blog {
            blog_id: BlogId::from_uuid(self.id),
            title: self.title,
            user_id: UserId::from_uuid(self.user_id),
            body: self.body,
            image_path: self.image_path,
            category_id: self.category_id,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BlogDetailsRow {
    #[sqlx(flatten)]
    blog: BlogRow,
    username: String,
    user_image_path: Option<String>,
    category_name: Option<String>,
}

impl BlogDetailsRow {
    fn into_details(self) -> BlogDetails {
        BlogDetails {
            blog: self.blog.into_blog(),
            username: self.username,
            user_image_path: self.user_image_path,
            category_name: self.category_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    user_id: Uuid,
    blog_id: Uuid,
    comment: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            blog_id: BlogId::from_uuid(self.blog_id),
            comment: self.comment,
            username: self.username,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentViewRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    user_image_path: Option<String>,
}

impl CommentViewRow {
    fn into_view(self) -> CommentView {
        CommentView {
            comment: self.comment.into_comment(),
            user_image_path: self.user_image_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_push_filter_sql() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM blogs b JOIN users u ON u.id = b.user_id");
        push_filter(&mut qb, &BlogFilter::Search("x".to_string()));
        assert_eq!(
            qb.sql(),
            "SELECT 1 FROM blogs b JOIN users u ON u.id = b.user_id WHERE b.title ILIKE $1 OR u.username ILIKE $2"
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM blogs b");
        push_filter(&mut qb, &BlogFilter::All);
        assert_eq!(qb.sql(), "SELECT 1 FROM blogs b");

        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM blogs b");
        push_filter(&mut qb, &BlogFilter::Category(4));
        assert_eq!(qb.sql(), "SELECT 1 FROM blogs b WHERE b.category_id = $1");
    }
}
