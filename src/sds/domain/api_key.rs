use crate::shared::error::ValidationError;
use std::fmt;

/// Header carrying the access key on every request
pub const API_KEY_HEADER: &str = "X-SDS-SEARCH-ACCESS-API-KEY";

/// Access key for the SDS API. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self(key))
    }

    /// Treats an empty or whitespace-only value as "no key"
    pub fn from_optional(key: Option<String>) -> Option<Self> {
        key.and_then(|k| Self::new(k).ok())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First and last four characters, for confirmation output
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}
