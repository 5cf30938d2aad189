use crate::shared::error::SdsError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest SDS PDF the upload endpoint accepts (5 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum size for configuration and key files (1 MiB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` instead of `metadata()` so the link itself is
/// inspected, not the target it points to.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        return Err(symlink_refused(path, operation).into());
    }

    Ok(())
}

fn symlink_refused(path: &Path, operation: &str) -> SdsError {
    SdsError::SecurityError {
        path: path.to_path_buf(),
        reason: format!(
            "{} operations on symbolic links are not allowed",
            operation
        ),
        hint: "Point to the regular file itself instead of a symbolic link".to_string(),
    }
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// Returns the file length so callers can enforce size limits without a
/// second metadata lookup.
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        return Err(symlink_refused(path, "read").into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(SdsError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Check that the path points to the expected file".to_string(),
        }
        .into());
    }
    Ok(())
}
