use super::UploadOutcome;
use crate::ports::outbound::ApiResponse;
use crate::sds::domain::{NewRevisionInfo, SdsDetails, SdsSummary};

/// Result of one CLI command, ready to be formatted
#[derive(Debug, Clone, PartialEq)]
pub enum SdsResponse {
    Search(ApiResponse<Vec<SdsSummary>>),
    Details(ApiResponse<SdsDetails>),
    DetailsBatch(ApiResponse<Vec<SdsDetails>>),
    RevisionInfo(ApiResponse<NewRevisionInfo>),
    RevisionInfoBatch(ApiResponse<Vec<NewRevisionInfo>>),
    Upload(UploadOutcome),
}

impl SdsResponse {
    /// The JSON view: the body exactly as the server sent it, or the
    /// serialized outcome for uploads
    pub fn raw_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            SdsResponse::Search(r) => Ok(r.raw.clone()),
            SdsResponse::Details(r) => Ok(r.raw.clone()),
            SdsResponse::DetailsBatch(r) => Ok(r.raw.clone()),
            SdsResponse::RevisionInfo(r) => Ok(r.raw.clone()),
            SdsResponse::RevisionInfoBatch(r) => Ok(r.raw.clone()),
            SdsResponse::Upload(outcome) => serde_json::to_value(outcome),
        }
    }
}
