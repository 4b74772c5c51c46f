//! Per-request scratch copies of downloaded media.
//!
//! A `ScratchFile` owns `{dir}/{file_id}.ogg` for the lifetime of one relay
//! call and removes it on drop, so every exit path cleans up.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use voxbrief_core::types::SCRATCH_EXTENSION;
use voxbrief_core::MediaKind;

#[derive(Debug)]
pub struct ScratchFile {
    file_id: String,
    kind: MediaKind,
    path: PathBuf,
}

impl ScratchFile {
    /// Reserve the scratch path for `file_id` under `dir`. Nothing is created
    /// on disk until the transport downloads into [`ScratchFile::path`].
    pub fn new(dir: &Path, file_id: &str, kind: MediaKind) -> Self {
        let name = format!("{}.{SCRATCH_EXTENSION}", sanitize(file_id));
        Self {
            file_id: file_id.to_string(),
            kind,
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Name sent with the multipart upload.
    pub fn upload_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("upload.{SCRATCH_EXTENSION}"))
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "scratch file removed"),
            // Download never happened or failed before creating the file.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove scratch file")
            }
        }
    }
}

/// Telegram file ids are URL-safe base64, but never let one escape `dir`.
fn sanitize(file_id: &str) -> String {
    file_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
