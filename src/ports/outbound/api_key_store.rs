use crate::sds::domain::ApiKey;
use crate::shared::Result;

/// ApiKeyStore port for the single locally persisted API key
///
/// Callers read the key once and pass it on explicitly; nothing else reads
/// the store behind their back.
pub trait ApiKeyStore {
    /// Returns the stored key, or `None` when nothing (or an empty value) is stored
    fn load(&self) -> Result<Option<ApiKey>>;

    /// Replaces the stored key
    fn save(&self, key: &ApiKey) -> Result<()>;

    /// Forgets the stored key by writing an empty value
    fn clear(&self) -> Result<()>;
}
