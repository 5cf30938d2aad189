use crate::ports::outbound::ApiKeyStore;
use crate::sds::domain::ApiKey;
use crate::shared::error::SdsError;
use crate::shared::security::{
    validate_file_size, validate_not_symlink, validate_regular_file, MAX_CONFIG_FILE_SIZE,
};
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Overrides the directory the key file lives under (defaults to `$HOME`)
pub const HOME_ENV: &str = "SDS_CLIENT_HOME";

const STORE_DIR: &str = ".sds-client";
const KEY_FILE: &str = "api_key";

/// FileApiKeyStore adapter keeping the API key in a single local file
///
/// The file holds the bare key. An empty file means "no key".
pub struct FileApiKeyStore {
    path: PathBuf,
}

impl FileApiKeyStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under `$SDS_CLIENT_HOME/.sds-client/api_key`, falling back to the
    /// user's home directory
    pub fn locate() -> Result<Self> {
        let home = std::env::var_os(HOME_ENV)
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var_os("HOME"))
            .or_else(|| std::env::var_os("USERPROFILE"))
            .ok_or_else(|| SdsError::KeyStoreUnavailable {
                reason: "neither SDS_CLIENT_HOME nor HOME is set".to_string(),
            })?;
        Ok(Self::new(
            PathBuf::from(home).join(STORE_DIR).join(KEY_FILE),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_key(&self, contents: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| SdsError::FileWriteError {
                path: dir.to_path_buf(),
                details: e.to_string(),
            })?;
        }
        if fs::symlink_metadata(&self.path).is_ok() {
            validate_not_symlink(&self.path, "write")?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let write_error = |e: std::io::Error| SdsError::FileWriteError {
            path: self.path.clone(),
            details: e.to_string(),
        };
        let mut file = options.open(&self.path).map_err(write_error)?;
        // The open mode only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(write_error)?;
        }
        file.write_all(contents.as_bytes()).map_err(write_error)?;
        Ok(())
    }
}

impl ApiKeyStore for FileApiKeyStore {
    fn load(&self) -> Result<Option<ApiKey>> {
        if fs::symlink_metadata(&self.path).is_err() {
            return Ok(None);
        }
        let size = validate_regular_file(&self.path, "API key file")?;
        validate_file_size(size, &self.path, MAX_CONFIG_FILE_SIZE)?;

        let contents = fs::read_to_string(&self.path).map_err(|e| SdsError::FileReadError {
            path: self.path.clone(),
            details: e.to_string(),
        })?;
        Ok(ApiKey::from_optional(Some(contents)))
    }

    fn save(&self, key: &ApiKey) -> Result<()> {
        self.write_key(key.expose())?;
        tracing::info!(path = %self.path.display(), "API key saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if fs::symlink_metadata(&self.path).is_err() {
            return Ok(());
        }
        self.write_key("")?;
        tracing::info!(path = %self.path.display(), "API key cleared");
        Ok(())
    }
}
