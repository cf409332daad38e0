//! S3 implementation of `MediaStore`.
//!
//! Objects are written under an `uploads/` key prefix; the public URL is
//! either the configured CDN base or the bucket's virtual-hosted address.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tokio::time::timeout;

use super::{MediaStore, object_name};
use crate::config::S3Settings;
use crate::error::AppError;

/// A single provider round-trip may take this long before the upload is
/// reported failed rather than left hanging.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub struct S3MediaStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
    base_url: Option<String>,
}

impl S3MediaStore {
    pub async fn new(settings: &S3Settings) -> Self {
        let aws_config = aws_config::load_from_env().await;
        let client = aws_sdk_s3::Client::new(&aws_config);

        Self {
            client,
            bucket: settings.bucket.clone(),
            region: settings.region.clone(),
            base_url: settings.base_url.clone(),
        }
    }
}

/// Public URL for a stored object key: the CDN base when configured,
/// otherwise the bucket's virtual-hosted address.
fn public_url(base_url: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload(&self, data: Vec<u8>, suggested_name: &str) -> Result<String, AppError> {
        let key = format!("uploads/{}", object_name(suggested_name));
        let content_type = mime_guess::from_path(suggested_name).first_or_octet_stream();

        let put = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type.as_ref())
            .body(ByteStream::from(data))
            .send();

        match timeout(UPLOAD_TIMEOUT, put).await {
            Ok(Ok(_)) => Ok(public_url(
                self.base_url.as_deref(),
                &self.bucket,
                &self.region,
                &key,
            )),
            Ok(Err(err)) => Err(AppError::Upload(format!(
                "provider rejected {}: {}",
                key, err
            ))),
            Err(_) => Err(AppError::Upload(format!("upload of {} timed out", key))),
        }
    }
}
