use crate::sds::domain::{check_upload_size, SelectedFile};
use crate::shared::error::SdsError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Reads a local file for upload
///
/// The size limit is checked against file metadata first so an oversized
/// file is rejected without being read.
///
/// # Errors
/// Returns `ValidationError::FileTooLarge` for oversized files,
/// `SdsError::SecurityError` for a symlink, or `SdsError::FileReadError`
/// when the path is missing or not a regular file
pub fn read_upload_file(path: &Path, max_bytes: u64) -> Result<SelectedFile> {
    let size = validate_regular_file(path, "upload file").map_err(|e| {
        if e.is::<SdsError>() {
            return e;
        }
        SdsError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    check_upload_size(&name, size, max_bytes)?;

    let bytes = fs::read(path).map_err(|e| SdsError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    tracing::debug!(file = %name, bytes = bytes.len(), "upload file read");
    Ok(SelectedFile::new(name, bytes))
}
