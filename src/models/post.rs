use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'posts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,

    pub created_at: chrono::NaiveDateTime,

    /// Attachments owned by this post; populated by the repository.
    #[sqlx(skip)]
    pub media: Vec<PostMedia>,
}

impl Post {
    /// Content sanitized for embedding in a page. Stored text is kept
    /// verbatim; script tags and event-handler attributes are stripped
    /// here, at render time.
    pub fn content_html(&self) -> String {
        crate::utils::html::clean_html(&self.content)
    }
}

/// Represents the 'post_media' table. A row exists only while its owning
/// post exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostMedia {
    pub id: i64,
    pub post_id: i64,
    pub media_url: String,
}

impl PostMedia {
    /// Video attachments get a <video> tag in the templates, everything
    /// else an <img>.
    pub fn is_video(&self) -> bool {
        let url = self.media_url.to_ascii_lowercase();
        url.ends_with(".mp4") || url.ends_with(".webm")
    }
}

/// DTO for the add/edit form text fields.
#[derive(Debug, Clone, Validate)]
pub struct PostForm {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title is required and must be at most 200 chars"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 10000,
        message = "Content is required and must be at most 10000 chars"
    ))]
    pub content: String,
}

/// Flattens validator output into user-facing messages, one per failed rule.
pub fn field_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect()
}
