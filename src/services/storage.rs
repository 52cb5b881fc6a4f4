// SPDX-License-Identifier: MIT

//! Object storage client for avatar images.
//!
//! Objects land at `{user_id}/{random}.{ext}` inside the avatar bucket.
//! Uploads allow overwrite; the returned public URL is written back into
//! the profile row by the caller.

use crate::config::Config;
use crate::error::AppError;
use uuid::Uuid;

/// Extensions longer than this are treated as junk and replaced.
const MAX_EXT_LEN: usize = 10;
const DEFAULT_EXT: &str = "bin";

/// Object storage client.
#[derive(Clone)]
pub struct StorageClient {
    inner: Option<StorageCtx>,
}

#[derive(Clone)]
struct StorageCtx {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    bucket: String,
}

impl StorageClient {
    /// Create a new storage client from config.
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Some(StorageCtx {
                http: reqwest::Client::new(),
                base_url: config.provider_url.clone(),
                anon_key: config.provider_anon_key.clone(),
                bucket: config.avatar_bucket.clone(),
            }),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All storage operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { inner: None }
    }

    fn ctx(&self) -> Result<&StorageCtx, AppError> {
        self.inner.as_ref().ok_or_else(|| {
            AppError::Storage("Object storage not connected (offline mode)".to_string())
        })
    }

    /// Upload an object, overwriting any existing object at `path`.
    pub async fn upload(
        &self,
        token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        let ctx = self.ctx()?;
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            ctx.base_url,
            ctx.bucket,
            encode_path(path)
        );

        let response = ctx
            .http
            .post(&url)
            .header("apikey", &ctx.anon_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type.to_string())
            .bearer_auth(token)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Storage(format!("HTTP {}: {}", status, body)))
    }

    /// Publicly retrievable URL for a stored object.
    pub fn public_url(&self, path: &str) -> Result<String, AppError> {
        let ctx = self.ctx()?;
        Ok(public_object_url(&ctx.base_url, &ctx.bucket, path))
    }
}

/// Build the public URL for an object in a public bucket.
fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url,
        bucket,
        encode_path(path)
    )
}

/// Percent-encode each path segment, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Derive a storage path for a user's avatar upload.
///
/// The filename is randomized so repeat uploads never collide with each
/// other mid-replacement; only the original extension is preserved.
pub fn avatar_object_path(user_id: &str, original_filename: &str) -> String {
    let ext = extract_extension(original_filename);
    format!("{}/{}.{}", user_id, Uuid::new_v4(), ext)
}

/// Pull a usable lowercase extension out of an uploaded filename.
fn extract_extension(filename: &str) -> String {
    let ext = filename
        .rsplit_once('.')
        .map(|(stem, ext)| if stem.is_empty() { "" } else { ext })
        .unwrap_or("");

    let ext = ext.to_ascii_lowercase();
    if ext.is_empty() || ext.len() > MAX_EXT_LEN || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return DEFAULT_EXT.to_string();
    }
    ext
}
