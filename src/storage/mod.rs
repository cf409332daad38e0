// src/storage/mod.rs

//! Media storage backends.
//!
//! A single `MediaStore` capability turns an uploaded blob into a durable
//! public URL. The backend is resolved once at startup from configuration:
//! hosted object storage when `S3_BUCKET` is set, the local filesystem
//! otherwise.

pub mod local;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::utils::files::sanitize_filename;

/// Media storage contract: store a blob, get back its public URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores `data` under a name derived from `suggested_name` and
    /// returns the public URL of the stored object. Fails with
    /// `AppError::Upload` on provider or filesystem failure.
    async fn upload(&self, data: Vec<u8>, suggested_name: &str) -> Result<String, AppError>;
}

/// Picks and initializes the media backend for this process.
pub async fn from_config(config: &Config) -> Result<Arc<dyn MediaStore>, AppError> {
    match &config.s3 {
        Some(settings) => {
            tracing::info!("Media storage: S3 bucket '{}'", settings.bucket);
            Ok(Arc::new(s3::S3MediaStore::new(settings).await))
        }
        None => {
            tracing::info!("Media storage: local directory '{}'", config.upload_dir);
            let store =
                local::LocalMediaStore::new(config.upload_dir.clone().into(), "/uploads").await?;
            Ok(Arc::new(store))
        }
    }
}

/// Builds a collision-free object name from the client-supplied filename.
/// The random prefix keeps repeated uploads of the same file distinct.
pub(crate) fn object_name(suggested_name: &str) -> String {
    format!(
        "{}-{}",
        Uuid::new_v4().simple(),
        sanitize_filename(suggested_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_are_unique_per_call() {
        let a = object_name("photo.png");
        let b = object_name("photo.png");
        assert_ne!(a, b);
        assert!(a.ends_with("-photo.png"));
    }

    #[test]
    fn object_names_strip_path_components() {
        let name = object_name("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }
}
