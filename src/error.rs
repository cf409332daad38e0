// src/error.rs

use axum::response::{IntoResponse, Redirect, Response};
use std::fmt;

use crate::utils::notice::list_url;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // Bad or missing input; the form is redisplayed with messages
    Validation(String),

    // Wrong shared secret; the secret prompt is redisplayed
    Auth(String),

    // Media provider failure for a single file
    Upload(String),

    // Unknown post id
    NotFound(String),

    // Constraint or transaction failure; the write was rolled back
    Persistence(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
///
/// Validation and Auth failures are normally handled inline by the handlers
/// (the form or secret prompt is re-rendered); everything that bubbles up
/// here becomes a redirect to the list page with a transient notice. Raw
/// error text is logged, never rendered.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            AppError::Persistence(msg) => {
                tracing::error!("Persistence failure: {}", msg);
                "Something went wrong, please try again.".to_string()
            }
            AppError::Upload(msg) => {
                tracing::warn!("Upload failure: {}", msg);
                "Media upload failed.".to_string()
            }
            AppError::NotFound(msg) => msg,
            AppError::Validation(msg) => msg,
            AppError::Auth(msg) => msg,
        };

        Redirect::to(&list_url(None, Some(&message))).into_response()
    }
}

/// Converts `sqlx::Error` into the matching `AppError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Post not found".to_string()),
            other => AppError::Persistence(other.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Validation(err.to_string())
    }
}
