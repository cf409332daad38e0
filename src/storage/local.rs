//! Local filesystem implementation of `MediaStore`.
//!
//! Blobs land under a root directory that the router serves statically, so
//! the synthesized URL is a path on this server's own origin.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{MediaStore, object_name};
use crate::error::AppError;

pub struct LocalMediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalMediaStore {
    /// Creates the upload directory if it does not exist yet.
    pub async fn new(root: PathBuf, url_prefix: &str) -> Result<Self, AppError> {
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Upload(format!("cannot create upload dir {}: {}", root.display(), e))
        })?;

        Ok(Self {
            root,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, data: Vec<u8>, suggested_name: &str) -> Result<String, AppError> {
        let name = object_name(suggested_name);
        let target = self.root.join(&name);

        fs::write(&target, &data).await.map_err(|e| {
            AppError::Upload(format!("failed to write {}: {}", target.display(), e))
        })?;

        Ok(format!("{}/{}", self.url_prefix, name))
    }
}
