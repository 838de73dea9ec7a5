//! Transient storage for uploaded images.
//!
//! DESIGN
//! ======
//! An upload is written under the configured directory with a collision-free
//! name (`image-<millis>-<random>.<ext>`) and held by a [`TempUpload`] guard.
//! Dropping the guard removes the file, so every exit path of the relay
//! pipeline (success, upstream error, panic, task cancellation) cleans up.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::{debug, warn};

const FILE_PREFIX: &str = "image";
const MAX_EXTENSION_LEN: usize = 10;

// =============================================================================
// UPLOADED IMAGE
// =============================================================================

/// An image received from a client, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

// =============================================================================
// TEMP UPLOAD GUARD
// =============================================================================

/// A file on local storage that is deleted when this value is dropped.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Write `image` into `dir` under a freshly generated name.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be written. A partially
    /// written file is removed before returning.
    pub async fn persist(dir: &Path, image: &UploadedImage) -> std::io::Result<Self> {
        let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
        let name = unique_file_name(&image.original_name, &image.mime_type, now_ms(), suffix);
        let guard = Self { path: dir.join(name) };
        tokio::fs::write(&guard.path, &image.bytes).await?;
        debug!(path = %guard.path.display(), bytes = image.bytes.len(), "upload persisted");
        Ok(guard)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "upload removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove upload"),
        }
    }
}

// =============================================================================
// NAMING
// =============================================================================

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

/// Build `image-<millis>-<suffix>.<ext>` for an upload.
#[must_use]
pub fn unique_file_name(original_name: &str, mime_type: &str, millis: u128, suffix: u32) -> String {
    format!("{FILE_PREFIX}-{millis}-{suffix}.{}", extension_for(original_name, mime_type))
}

/// Extension taken from the original file name, falling back to the MIME
/// subtype. Only ASCII alphanumerics survive so a name can never escape the
/// upload directory.
fn extension_for(original_name: &str, mime_type: &str) -> String {
    let from_name = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .and_then(sanitize_extension);
    if let Some(ext) = from_name {
        return ext;
    }

    let subtype = mime_type
        .split_once('/')
        .map_or("", |(_, sub)| sub)
        .split(['+', ';'])
        .next()
        .unwrap_or_default();
    let subtype = if subtype.eq_ignore_ascii_case("jpeg") { "jpg" } else { subtype };
    sanitize_extension(subtype).unwrap_or_else(|| "bin".to_string())
}

fn sanitize_extension(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > MAX_EXTENSION_LEN || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(raw.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
