use crate::shared::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_REGION: &str = "all";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// SDS identifier as the API hands it out.
///
/// Search results carry opaque string ids while some endpoints answer with
/// numeric ones; both are accepted. Purely numeric ids are sent back as JSON
/// numbers, everything else as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SdsId(String);

impl SdsId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SdsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric ids go out as JSON numbers, but only when the number prints back
/// to the same text; `"007"` or `"+7"` stay strings.
impl Serialize for SdsId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(number) if number.to_string() == self.0 => serializer.serialize_u64(number),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for SdsId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(i64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Self(text),
            Repr::Number(number) => Self(number.to_string()),
        })
    }
}

/// Query mode understood by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    #[default]
    SimpleQueryString,
    Match,
    MatchPhrase,
}

impl std::str::FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "simple_query_string" | "simple" => Ok(SearchType::SimpleQueryString),
            "match" => Ok(SearchType::Match),
            "match_phrase" | "phrase" => Ok(SearchType::MatchPhrase),
            _ => Err(format!(
                "Invalid search type: {}. Please specify 'simple_query_string', 'match' or 'match_phrase'",
                s
            )),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Field-targeted search criteria
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AdvancedSearch {
    #[serde(skip_serializing_if = "is_blank")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub cas_no: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub product_code: Option<String>,
}

impl AdvancedSearch {
    pub fn is_empty(&self) -> bool {
        is_blank(&self.product_name)
            && is_blank(&self.supplier_name)
            && is_blank(&self.cas_no)
            && is_blank(&self.product_code)
    }
}

/// Body of `POST /sds/search/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub search: Option<String>,
    pub search_type: SearchType,
    #[serde(skip_serializing_if = "is_blank")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_revision_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "is_blank")]
    pub region_short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_search: Option<AdvancedSearch>,
    #[serde(skip)]
    pub page: u32,
    #[serde(skip)]
    pub page_size: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            search: None,
            search_type: SearchType::default(),
            language_code: Some(DEFAULT_LANGUAGE_CODE.to_string()),
            order_by: None,
            minimum_revision_date: None,
            region_short_name: Some(DEFAULT_REGION.to_string()),
            advanced_search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchQuery {
    pub fn new(search: Option<String>) -> Self {
        Self {
            search: non_blank(search),
            ..Self::default()
        }
    }

    /// Attaches advanced criteria; dropped entirely when every field is blank
    pub fn with_advanced(mut self, advanced: AdvancedSearch) -> Self {
        self.advanced_search = if advanced.is_empty() {
            None
        } else {
            Some(advanced)
        };
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
        self
    }
}

/// Body of `POST /sds/details/` and `POST /sds/newRevisionInfo/`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SdsLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sds_id: Option<SdsId>,
    #[serde(skip_serializing_if = "is_blank")]
    pub pdf_md5: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub language_code: Option<String>,
}

impl SdsLookup {
    /// Builds a lookup; at least one of `sds_id` or `pdf_md5` must be set
    pub fn new(
        sds_id: Option<String>,
        pdf_md5: Option<String>,
        language_code: Option<String>,
    ) -> Result<Self, ValidationError> {
        let sds_id = non_blank(sds_id).map(SdsId::new);
        let pdf_md5 = non_blank(pdf_md5);
        if sds_id.is_none() && pdf_md5.is_none() {
            return Err(ValidationError::MissingLookupKey);
        }
        Ok(Self {
            sds_id,
            pdf_md5,
            language_code: non_blank(language_code),
        })
    }

    /// Same lookup without the language, as the revision endpoint expects
    pub fn without_language(&self) -> Self {
        Self {
            language_code: None,
            ..self.clone()
        }
    }
}

/// Body of the `multiple*` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SdsBatchLookup {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sds_id: Vec<SdsId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pdf_md5: Vec<String>,
}

impl SdsBatchLookup {
    pub fn new(sds_ids: Vec<String>, pdf_md5s: Vec<String>) -> Result<Self, ValidationError> {
        let sds_id: Vec<SdsId> = sds_ids
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .map(SdsId::new)
            .collect();
        let pdf_md5: Vec<String> = pdf_md5s
            .into_iter()
            .filter(|md5| !md5.trim().is_empty())
            .collect();
        if sds_id.is_empty() && pdf_md5.is_empty() {
            return Err(ValidationError::MissingLookupKey);
        }
        Ok(Self { sds_id, pdf_md5 })
    }

    pub fn len(&self) -> usize {
        self.sds_id.len() + self.pdf_md5.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
