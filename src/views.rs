// src/views.rs

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::models::post::Post;

/// Renders an askama template into an HTML response. Render failures are
/// logged and answered with a bare 500; the raw error never reaches the
/// client.
pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!("Template rendering failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET / — the post list, with optional transient messages.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub posts: &'a [Post],
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Shared add/edit form. `existing` carries the stored post on edit so its
/// current attachments can be shown.
#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate<'a> {
    pub heading: &'a str,
    pub action: String,
    pub title: String,
    pub content: String,
    pub existing: Option<&'a Post>,
    pub errors: Vec<String>,
}

/// Re-prompt shown when a mutating add/edit request arrives without a valid
/// secret. The submitted text fields ride along as hidden inputs so nothing
/// typed is lost; files must be re-attached.
#[derive(Template)]
#[template(path = "secret_prompt.html")]
pub struct SecretPromptTemplate {
    pub action: String,
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

/// GET /delete/{id} confirmation page, doubling as the re-prompt after a
/// failed secret on delete.
#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate<'a> {
    pub post: &'a Post,
    pub error: Option<String>,
}
