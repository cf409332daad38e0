use std::sync::Arc;

use axum::Form;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;
use crate::models::post::{PostForm, field_messages};
use crate::repo;
use crate::storage::MediaStore;
use crate::utils::files::allowed_file;
use crate::utils::notice::list_url;
use crate::utils::secret::verify_secret;
use crate::views::{
    ConfirmDeleteTemplate, IndexTemplate, PostFormTemplate, SecretPromptTemplate, render,
};

/// Transient messages carried on redirects back to the list page.
#[derive(Debug, Deserialize)]
pub struct NoticeParams {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// GET / — the post list.
pub async fn index(
    State(pool): State<SqlitePool>,
    Query(params): Query<NoticeParams>,
) -> Response {
    match repo::list_posts(&pool).await {
        Ok(posts) => render(&IndexTemplate {
            posts: &posts,
            notice: params.notice,
            error: params.error,
        }),
        Err(err) => {
            tracing::error!("Failed to load posts: {}", err);
            render(&IndexTemplate {
                posts: &[],
                notice: None,
                error: Some("Error loading posts".to_string()),
            })
        }
    }
}

/// GET /add — empty form.
pub async fn new_post() -> Response {
    render(&PostFormTemplate {
        heading: "Add post",
        action: "/add".to_string(),
        title: String::new(),
        content: String::new(),
        existing: None,
        errors: Vec::new(),
    })
}

/// POST /add — secret check, validation, uploads, insert.
pub async fn create_post(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    State(store): State<Arc<dyn MediaStore>>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;

    if !verify_secret(&submission.secret_key, &config.secret_key) {
        return Ok(render(&SecretPromptTemplate {
            action: "/add".to_string(),
            title: submission.title,
            content: submission.content,
            error: Some("Invalid secret key!".to_string()),
        }));
    }

    let form = PostForm {
        title: submission.title,
        content: submission.content,
    };
    if let Err(validation_errors) = form.validate() {
        return Ok(render(&PostFormTemplate {
            heading: "Add post",
            action: "/add".to_string(),
            title: form.title,
            content: form.content,
            existing: None,
            errors: field_messages(&validation_errors),
        }));
    }

    let (urls, file_notices) = store_files(&store, submission.files).await;

    let post = repo::create_post(&pool, &form.title, &form.content, &urls).await?;
    tracing::info!("Created post {}", post.id);

    Ok(redirect_with_outcome("Post added successfully!", file_notices))
}

/// GET /edit/{id} — form pre-filled from the existing post.
pub async fn edit_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let post = repo::get_post(&pool, id).await?;

    Ok(render(&PostFormTemplate {
        heading: "Edit post",
        action: format!("/edit/{}", id),
        title: post.title.clone(),
        content: post.content.clone(),
        existing: Some(&post),
        errors: Vec::new(),
    }))
}

/// POST /edit/{id} — secret check, validation, optional media replacement,
/// update.
pub async fn update_post(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    State(store): State<Arc<dyn MediaStore>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;

    if !verify_secret(&submission.secret_key, &config.secret_key) {
        return Ok(render(&SecretPromptTemplate {
            action: format!("/edit/{}", id),
            title: submission.title,
            content: submission.content,
            error: Some("Invalid secret key!".to_string()),
        }));
    }

    let form = PostForm {
        title: submission.title,
        content: submission.content,
    };
    if let Err(validation_errors) = form.validate() {
        let existing = repo::get_post(&pool, id).await?;
        return Ok(render(&PostFormTemplate {
            heading: "Edit post",
            action: format!("/edit/{}", id),
            title: form.title,
            content: form.content,
            existing: Some(&existing),
            errors: field_messages(&validation_errors),
        }));
    }

    let (urls, file_notices) = store_files(&store, submission.files).await;

    // Media is replaced only when at least one new file made it through;
    // a submission whose files were all rejected keeps the old set.
    let replacement = (!urls.is_empty()).then_some(urls);

    let post = repo::update_post(&pool, id, &form.title, &form.content, replacement.as_deref())
        .await?;
    tracing::info!("Updated post {}", post.id);

    Ok(redirect_with_outcome("Post updated successfully!", file_notices))
}

/// GET /delete/{id} — confirmation and secret prompt.
pub async fn confirm_delete(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let post = repo::get_post(&pool, id).await?;

    Ok(render(&ConfirmDeleteTemplate {
        post: &post,
        error: None,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub secret_key: Option<String>,
}

/// POST /delete/{id} — secret check, then cascade delete.
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let submitted = form.secret_key.as_deref().unwrap_or("");
    if !verify_secret(submitted, &config.secret_key) {
        let post = repo::get_post(&pool, id).await?;
        return Ok(render(&ConfirmDeleteTemplate {
            post: &post,
            error: Some("Invalid secret key!".to_string()),
        }));
    }

    repo::delete_post(&pool, id).await?;
    tracing::info!("Deleted post {}", id);

    Ok(Redirect::to(&list_url(Some("Post deleted successfully!"), None)).into_response())
}

/// Fields collected from a multipart add/edit submission. File parts with
/// an empty filename are ignored (browsers send one when no file is
/// chosen).
#[derive(Debug, Default)]
struct Submission {
    secret_key: String,
    title: String,
    content: String,
    files: Vec<(String, Vec<u8>)>,
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "secret_key" => submission.secret_key = field.text().await?,
            "title" => submission.title = field.text().await?,
            "content" => submission.content = field.text().await?,
            "media" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    continue;
                }
                let data = field.bytes().await?;
                submission.files.push((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// Uploads each allowed file, collecting public URLs and per-file notices.
/// A rejected or failed file is skipped; the rest of the submission still
/// goes through.
async fn store_files(
    store: &Arc<dyn MediaStore>,
    files: Vec<(String, Vec<u8>)>,
) -> (Vec<String>, Vec<String>) {
    let mut urls = Vec::new();
    let mut notices = Vec::new();

    for (filename, data) in files {
        if !allowed_file(&filename) {
            notices.push(format!("Skipped {}: file type not allowed", filename));
            continue;
        }
        match store.upload(data, &filename).await {
            Ok(url) => urls.push(url),
            Err(err) => {
                tracing::warn!("Upload of {} failed: {}", filename, err);
                notices.push(format!("Upload of {} failed", filename));
            }
        }
    }

    (urls, notices)
}

fn redirect_with_outcome(success: &str, file_notices: Vec<String>) -> Response {
    let error = if file_notices.is_empty() {
        None
    } else {
        Some(file_notices.join(" "))
    };

    Redirect::to(&list_url(Some(success), error.as_deref())).into_response()
}
