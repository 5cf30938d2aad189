use crate::sds::domain::{SdsBatchLookup, SdsLookup};
use crate::shared::error::ValidationError;

/// Lookup by one identifier, or by several through the batch endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Single(SdsLookup),
    Batch(SdsBatchLookup),
}

impl LookupRequest {
    /// Builds a request from repeated `--sds-id` / `--pdf-md5` values
    ///
    /// A single id and a single MD5 together still describe one sheet, so
    /// they go to the single endpoint. Anything more uses the batch endpoint,
    /// which has no language parameter.
    pub fn from_identifiers(
        sds_ids: Vec<String>,
        pdf_md5s: Vec<String>,
        language_code: Option<String>,
    ) -> Result<Self, ValidationError> {
        let sds_ids: Vec<String> = sds_ids.into_iter().filter(|s| !s.trim().is_empty()).collect();
        let pdf_md5s: Vec<String> = pdf_md5s.into_iter().filter(|s| !s.trim().is_empty()).collect();

        if sds_ids.len() <= 1 && pdf_md5s.len() <= 1 {
            let lookup = SdsLookup::new(
                sds_ids.into_iter().next(),
                pdf_md5s.into_iter().next(),
                language_code,
            )?;
            return Ok(LookupRequest::Single(lookup));
        }
        Ok(LookupRequest::Batch(SdsBatchLookup::new(sds_ids, pdf_md5s)?))
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, LookupRequest::Batch(_))
    }
}
