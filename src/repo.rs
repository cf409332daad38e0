// src/repo.rs

//! Data access for posts and their media attachments.
//!
//! Every multi-row write runs inside one transaction; a failed step rolls
//! back explicitly before the error is reported upward, so no partial rows
//! are ever visible.

use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::AppError;
use crate::models::post::{Post, PostMedia};

/// Returns all posts with their media, ordered by id ascending.
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<Post>, AppError> {
    let mut posts = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, created_at FROM posts ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    let media = sqlx::query_as::<_, PostMedia>(
        "SELECT id, post_id, media_url FROM post_media ORDER BY post_id ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut by_post: HashMap<i64, Vec<PostMedia>> = HashMap::new();
    for item in media {
        by_post.entry(item.post_id).or_default().push(item);
    }
    for post in &mut posts {
        if let Some(items) = by_post.remove(&post.id) {
            post.media = items;
        }
    }

    Ok(posts)
}

/// Fetches a single post with its media.
pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, created_at FROM posts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let media = sqlx::query_as::<_, PostMedia>(
        "SELECT id, post_id, media_url FROM post_media WHERE post_id = ? ORDER BY id ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Post { media, ..post })
}

/// Persists a post and its media rows atomically.
pub async fn create_post(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    media_urls: &[String],
) -> Result<Post, AppError> {
    let mut tx = pool.begin().await?;

    match insert_post(&mut tx, title, content, media_urls).await {
        Ok(post_id) => {
            tx.commit().await?;
            get_post(pool, post_id).await
        }
        Err(err) => {
            tx.rollback().await.ok();
            Err(err.into())
        }
    }
}

/// Updates a post's text fields and, when `replace_media` is supplied,
/// wholesale replaces its media set (delete-then-recreate) in the same
/// transaction. `Some(&[])` clears all media.
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    content: &str,
    replace_media: Option<&[String]>,
) -> Result<Post, AppError> {
    let mut tx = pool.begin().await?;

    match apply_update(&mut tx, id, title, content, replace_media).await {
        Ok(true) => {
            tx.commit().await?;
            get_post(pool, id).await
        }
        Ok(false) => {
            tx.rollback().await.ok();
            Err(AppError::NotFound(format!("Post {} not found", id)))
        }
        Err(err) => {
            tx.rollback().await.ok();
            Err(err.into())
        }
    }
}

/// Deletes a post and all its media rows atomically.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    match apply_delete(&mut tx, id).await {
        Ok(true) => {
            tx.commit().await?;
            Ok(())
        }
        Ok(false) => {
            tx.rollback().await.ok();
            Err(AppError::NotFound(format!("Post {} not found", id)))
        }
        Err(err) => {
            tx.rollback().await.ok();
            Err(err.into())
        }
    }
}

async fn insert_post(
    tx: &mut Transaction<'_, Sqlite>,
    title: &str,
    content: &str,
    media_urls: &[String],
) -> Result<i64, sqlx::Error> {
    let post_id = sqlx::query("INSERT INTO posts (title, content) VALUES (?, ?)")
        .bind(title)
        .bind(content)
        .execute(&mut **tx)
        .await?
        .last_insert_rowid();

    insert_media(tx, post_id, media_urls).await?;

    Ok(post_id)
}

async fn apply_update(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    title: &str,
    content: &str,
    replace_media: Option<&[String]>,
) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query("UPDATE posts SET title = ?, content = ? WHERE id = ?")
        .bind(title)
        .bind(content)
        .bind(id)
        .execute(&mut **tx)
        .await?
        .rows_affected();

    if updated == 0 {
        return Ok(false);
    }

    if let Some(urls) = replace_media {
        sqlx::query("DELETE FROM post_media WHERE post_id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        insert_media(tx, id, urls).await?;
    }

    Ok(true)
}

async fn apply_delete(tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<bool, sqlx::Error> {
    // Children first; the schema-level cascade is a backstop, the
    // repository owns the ordering.
    sqlx::query("DELETE FROM post_media WHERE post_id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

async fn insert_media(
    tx: &mut Transaction<'_, Sqlite>,
    post_id: i64,
    media_urls: &[String],
) -> Result<(), sqlx::Error> {
    for media_url in media_urls {
        sqlx::query("INSERT INTO post_media (post_id, media_url) VALUES (?, ?)")
            .bind(post_id)
            .bind(media_url)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
