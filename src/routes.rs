// src/routes.rs

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::posts;
use crate::state::AppState;

/// Cap on multipart bodies; requests beyond this are rejected outright.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Assembles the main application router.
///
/// * Registers the list/add/edit/delete pages.
/// * Serves local uploads when the filesystem media backend is active.
/// * Applies global middleware (Trace, body limit).
/// * Injects global state (pool, config, media store).
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(posts::index))
        .route("/add", get(posts::new_post).post(posts::create_post))
        .route("/edit/{id}", get(posts::edit_post).post(posts::update_post))
        .route(
            "/delete/{id}",
            get(posts::confirm_delete).post(posts::delete_post),
        );

    // The local backend serves its blobs from this process; the S3 backend
    // serves straight from the provider.
    if state.config.s3.is_none() {
        router = router.nest_service("/uploads", ServeDir::new(&state.config.upload_dir));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
