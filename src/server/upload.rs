use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// File extensions accepted for upload, lower-cased.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Returns true when the filename carries an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// An uploaded image spooled to disk for the duration of one request.
/// Spooled files get a fresh UUID name; only the client's extension is
/// kept.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Validates extension and size, then writes the bytes under a unique
    /// name in `dir`.
    pub async fn save(dir: &Path, filename: &str, bytes: &[u8], max_bytes: usize) -> Result<Self> {
        if !allowed_file(filename) {
            return Err(Error::invalid_upload("Invalid file type"));
        }
        if bytes.len() > max_bytes {
            return Err(Error::invalid_upload("File too large"));
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        let path = dir.join(format!("{}.{}", Uuid::new_v4(), extension));

        tokio::fs::write(&path, bytes).await?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the spooled file. Failure to remove is logged, not
    /// propagated; the request outcome does not depend on it.
    pub async fn cleanup(self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            warn!("Failed to remove temp upload {}: {}", self.path.display(), e);
        }
    }
}
