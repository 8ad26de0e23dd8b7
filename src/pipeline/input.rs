//! Input resolution: validate the user-supplied document path and load it
//! for upload.
//!
//! Existence and read permission are checked up front so a bad path fails
//! with a configuration error before any request is sent. The content is
//! not inspected: whether the file is a usable PDF is the service's call.

use crate::error::AnyPdfError;
use crate::pipeline::request::UploadFile;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A local document that exists and can be opened for reading.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    path: PathBuf,
}

impl ResolvedInput {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name sent in the multipart part.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string())
    }

    /// Read the document into an upload part. The file handle is closed
    /// before this returns.
    pub async fn load(&self) -> Result<UploadFile, AnyPdfError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| map_open_error(&self.path, e))?;
        debug!("Loaded {} ({} bytes)", self.path.display(), bytes.len());
        Ok(UploadFile::pdf(self.file_name(), bytes))
    }
}

/// Validate that `path` names an existing, readable file.
pub fn resolve_input(path: impl AsRef<Path>) -> Result<ResolvedInput, AnyPdfError> {
    let path = path.as_ref().to_path_buf();

    if !path.is_file() {
        return Err(AnyPdfError::FileNotFound { path });
    }

    // Check read permission by attempting to open
    if let Err(e) = std::fs::File::open(&path) {
        return Err(map_open_error(&path, e));
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(ResolvedInput { path })
}

fn map_open_error(path: &Path, e: std::io::Error) -> AnyPdfError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        AnyPdfError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        AnyPdfError::FileNotFound {
            path: path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = resolve_input("/definitely/not/a/real/file.pdf").unwrap_err();
        assert!(matches!(err, AnyPdfError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_not_a_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_input(dir.path()).unwrap_err();
        assert!(matches!(err, AnyPdfError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn load_reads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF-1.7 test").unwrap();

        let input = resolve_input(&path).unwrap();
        let upload = input.load().await.unwrap();
        assert_eq!(upload.file_name, "report.pdf");
        assert_eq!(upload.field, "file");
        assert_eq!(upload.mime, "application/pdf");
        assert_eq!(upload.bytes, b"%PDF-1.7 test");
    }
}
