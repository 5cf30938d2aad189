use crate::sds::domain::{
    ExtractionStatus, NewRevisionInfo, RequestId, SdsBatchLookup, SdsDetails, SdsLookup,
    SdsSummary, SearchQuery, UploadRequest,
};
use crate::shared::Result;
use async_trait::async_trait;

/// Typed response body together with the JSON it was decoded from
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub raw: serde_json::Value,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, raw: serde_json::Value) -> Self {
        Self { data, raw }
    }
}

/// SdsRepository port for the remote SDS API
///
/// This port abstracts the HTTP API so use cases can be driven by a mock in
/// tests. Implementations must be `Send + Sync`.
///
/// Errors are surfaced unchanged; implementations never retry.
#[async_trait]
pub trait SdsRepository: Send + Sync {
    /// `POST /sds/search/`
    async fn search(&self, query: &SearchQuery) -> Result<ApiResponse<Vec<SdsSummary>>>;

    /// `POST /sds/details/`
    ///
    /// # Arguments
    /// * `lookup` - SDS id and/or PDF MD5, optional language
    /// * `fe` - ask for the richer front-end payload (`?fe=true`)
    async fn details(&self, lookup: &SdsLookup, fe: bool) -> Result<ApiResponse<SdsDetails>>;

    /// `POST /sds/multipleDetails/`
    async fn multiple_details(
        &self,
        lookup: &SdsBatchLookup,
    ) -> Result<ApiResponse<Vec<SdsDetails>>>;

    /// `POST /sds/newRevisionInfo/`
    async fn new_revision_info(&self, lookup: &SdsLookup) -> Result<ApiResponse<NewRevisionInfo>>;

    /// `POST /sds/multipleNewRevisionInfo/`
    async fn multiple_new_revision_info(
        &self,
        lookup: &SdsBatchLookup,
    ) -> Result<ApiResponse<Vec<NewRevisionInfo>>>;

    /// `POST /sds/upload/` as multipart form data. Returns the raw acceptance body.
    async fn upload(&self, request: &UploadRequest) -> Result<serde_json::Value>;

    /// `GET /sds/getExtractionStatus/`
    async fn extraction_status(
        &self,
        request_id: &RequestId,
        email: Option<&str>,
    ) -> Result<ExtractionStatus>;
}
