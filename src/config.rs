// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub rust_log: String,
    pub port: u16,
    pub upload_dir: String,
    pub s3: Option<S3Settings>,
}

/// Hosted media storage settings. Built only when `S3_BUCKET` is present;
/// its absence selects the local-filesystem fallback.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// CDN domain used when synthesizing public URLs. Falls back to the
    /// virtual-hosted bucket URL when unset.
    pub base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://miniblog.db?mode=rwc".to_string());

        let secret_key = env::var("SECRET_KEY")
            .expect("SECRET_KEY must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let upload_dir = env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".to_string());

        let s3 = env::var("S3_BUCKET").ok().map(|bucket| S3Settings {
            bucket,
            region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            base_url: env::var("S3_BASE_URL").ok(),
        });

        Self {
            database_url,
            secret_key,
            rust_log,
            port,
            upload_dir,
            s3,
        }
    }
}
