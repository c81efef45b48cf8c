//! Blog Entity

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, UserId};

/// A blog post as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub blog_id: BlogId,
    pub title: String,
    pub user_id: UserId,
    pub body: String,
    /// Stored path of the cover image
    pub image_path: Option<String>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new post with a fresh UUID v4
    pub fn new(
        title: String,
        user_id: UserId,
        body: String,
        image_path: Option<String>,
        category_id: Option<i32>,
    ) -> Self {
        Self {
            blog_id: BlogId::new(),
            title,
            user_id,
            body,
            image_path,
            category_id,
            created_at: Utc::now(),
        }
    }
}

/// A post joined with its author and category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDetails {
    pub blog: Blog,
    pub username: String,
    pub user_image_path: Option<String>,
    pub category_name: Option<String>,
}

/// Fields an edit may change. `image_path: None` keeps the current image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: String,
    pub body: String,
    pub category_id: Option<i32>,
    pub image_path: Option<String>,
}

impl Blog {
    /// The post after `changes` are applied
    pub fn apply(&self, changes: &BlogChanges) -> Blog {
        Blog {
            title: changes.title.clone(),
            body: changes.body.clone(),
            category_id: changes.category_id,
            image_path: changes
                .image_path
                .clone()
                .or_else(|| self.image_path.clone()),
            ..self.clone()
        }
    }
}

/// Which posts a listing covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogFilter {
    All,
    Category(i32),
    Author(UserId),
    /// Case-insensitive substring of the title or the author's username
    Search(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog() -> Blog {
        Blog::new(
            "First post".to_string(),
            UserId::new(),
            "Hello there".to_string(),
            Some("public/images/blogs/1-a.png".to_string()),
            Some(2),
        )
    }

    #[test]
    fn test_apply_keeps_image_when_none() {
        let before = blog();
        let edited = before.apply(&BlogChanges {
            title: "Renamed".to_string(),
            body: "New body".to_string(),
            category_id: None,
            image_path: None,
        });

        assert_eq!(edited.blog_id, before.blog_id);
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.category_id, None);
        assert_eq!(edited.image_path, before.image_path);
        assert_eq!(edited.created_at, before.created_at);
    }

    #[test]
    fn test_apply_replaces_image() {
        let edited = blog().apply(&BlogChanges {
            title: "Renamed".to_string(),
            body: "New body".to_string(),
            category_id: Some(3),
            image_path: Some("public/images/blogs/2-b.png".to_string()),
        });

        assert_eq!(edited.image_path.as_deref(), Some("public/images/blogs/2-b.png"));
        assert_eq!(edited.category_id, Some(3));
    }
}
