//! Transient storage and data URI encoding of rendered documents.

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rdoc_core::RdocResult;
use tracing::debug;

/// MIME type of a Word document.
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Encode document bytes as a `data:` URI.
pub fn to_data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", DOCX_MIME, STANDARD.encode(bytes))
}

/// Writes each rendered document to its own temporary file and reads it back.
///
/// File names are unique per call, so overlapping requests never share a
/// path. The file is removed once the bytes have been read.
#[derive(Debug, Clone)]
pub struct TransientOutput {
    dir: PathBuf,
}

impl TransientOutput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `bytes`, then return what was read back from disk.
    pub fn persist_and_read(&self, bytes: &[u8]) -> RdocResult<Vec<u8>> {
        let mut file = tempfile::Builder::new()
            .prefix("report-")
            .suffix(".docx")
            .tempfile_in(&self.dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let stored = std::fs::read(file.path())?;
        debug!(path = %file.path().display(), size = stored.len(), "Stored rendered document");
        Ok(stored)
    }
}

impl Default for TransientOutput {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}
