//! Image upload and crop collaborators.

use crate::storage::BoxFuture;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Upload failures.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload rejected: {0}")]
    Rejected(String),
    #[error("Upload failed: {0}")]
    Transport(String),
}

/// Crop failures.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
    #[error("Invalid crop ratio: {0}")]
    InvalidRatio(f64),
}

/// Stores image bytes somewhere and returns a URL for them.
pub trait ImageUploader: Send + Sync {
    fn upload(&self, bytes: &[u8], path: &str) -> BoxFuture<'_, Result<String, UploadError>>;
}

/// Crops an image at `url` to `ratio` (width / height) and returns a data URL.
pub trait ImageCropper: Send + Sync {
    fn crop(&self, url: &str, ratio: f64) -> BoxFuture<'_, Result<String, CropError>>;
}

/// Keeps uploads in memory under `memory://<path>` URLs.
#[derive(Default)]
pub struct MemoryUploader {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under `url`, if any.
    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        let objects = self.objects.read().ok()?;
        objects.get(url).cloned()
    }
}

impl ImageUploader for MemoryUploader {
    fn upload(&self, bytes: &[u8], path: &str) -> BoxFuture<'_, Result<String, UploadError>> {
        let bytes = bytes.to_vec();
        let url = format!("memory://{}", path.trim_start_matches('/'));
        Box::pin(async move {
            if bytes.is_empty() {
                return Err(UploadError::Rejected("empty payload".to_string()));
            }
            let mut objects = self
                .objects
                .write()
                .map_err(|e| UploadError::Transport(format!("Lock error: {}", e)))?;
            objects.insert(url.clone(), bytes);
            Ok(url)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_memory_upload() {
        let uploader = MemoryUploader::new();
        let url = block_on(uploader.upload(&[1, 2, 3], "/photos/a.png")).unwrap();
        assert_eq!(url, "memory://photos/a.png");
        assert_eq!(uploader.get(&url), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_empty_upload_rejected() {
        let uploader = MemoryUploader::new();
        let result = block_on(uploader.upload(&[], "x.png"));
        assert!(matches!(result, Err(UploadError::Rejected(_))));
    }
}
