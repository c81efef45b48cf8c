pub mod blog;
pub mod comment;

pub use blog::{Blog, BlogChanges, BlogDetails, BlogFilter};
pub use comment::{Comment, CommentView};
