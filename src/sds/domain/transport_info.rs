use serde::{Deserialize, Serialize};

/// Tag marking a "no known hazards" row
pub const NO_KNOWN_HAZARDS: &str = "NO_KNOWN_HAZARDS";

/// Tag marking a "could not be detected" row
pub const CANNOT_DETECTED: &str = "CANNOT_DETECTED";

/// Sentinel tags whose boolean value flags a whole row instead of carrying data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelTag {
    NoKnownHazards,
    CannotDetected,
}

impl SentinelTag {
    /// Recognises a sentinel from its wire tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            NO_KNOWN_HAZARDS => Some(Self::NoKnownHazards),
            CANNOT_DETECTED => Some(Self::CannotDetected),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::NoKnownHazards => NO_KNOWN_HAZARDS,
            Self::CannotDetected => CANNOT_DETECTED,
        }
    }
}

/// Value carried by a transport information entry.
///
/// The API sends strings for data cells and booleans for sentinel flags.
/// Anything else is preserved but renders as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Text(String),
    Flag(bool),
    Other(serde_json::Value),
}

impl Default for EntryValue {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

/// One cell-worth of transport information inside a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    #[serde(default)]
    pub tag: String,
    /// Row key; entries sharing it across columns land on the same row
    #[serde(default)]
    pub default_literal: String,
    #[serde(default)]
    pub value: EntryValue,
    #[serde(default)]
    pub no_data_available: bool,
    #[serde(default)]
    pub order_score: f64,
}

impl ValueEntry {
    pub fn text(tag: &str, default_literal: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            default_literal: default_literal.to_string(),
            value: EntryValue::Text(value.to_string()),
            no_data_available: false,
            order_score: 0.0,
        }
    }

    pub fn flag(tag: &str, default_literal: &str, value: bool) -> Self {
        Self {
            tag: tag.to_string(),
            default_literal: default_literal.to_string(),
            value: EntryValue::Flag(value),
            no_data_available: false,
            order_score: 0.0,
        }
    }

    pub fn sentinel(&self) -> Option<SentinelTag> {
        SentinelTag::from_tag(&self.tag)
    }
}

/// A transport mode column (e.g. "ADR", "IMDG") with its entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportInfoColumn {
    #[serde(default)]
    pub tag: String,
    #[serde(rename = "value", default)]
    pub entries: Vec<ValueEntry>,
}

impl TransportInfoColumn {
    pub fn new(tag: &str, entries: Vec<ValueEntry>) -> Self {
        Self {
            tag: tag.to_string(),
            entries,
        }
    }
}
