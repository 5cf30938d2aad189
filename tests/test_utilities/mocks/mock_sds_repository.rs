use async_trait::async_trait;
use sds_client::prelude::*;
use sds_client::sds::domain::{
    NewRevisionInfo, SdsBatchLookup, SdsDetails, SdsSummary, UploadRequest,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted answer to one extraction status query
#[allow(dead_code)]
pub enum StatusReply {
    Status(u8, &'static str),
    Fail(&'static str),
}

/// Calls the mock has seen, in order
#[allow(dead_code)]
#[derive(Default)]
pub struct Recorded {
    pub searches: Vec<SearchQuery>,
    pub details: Vec<(SdsLookup, bool)>,
    pub batch_details: Vec<SdsBatchLookup>,
    pub revisions: Vec<SdsLookup>,
    pub batch_revisions: Vec<SdsBatchLookup>,
    pub uploads: Vec<UploadRequest>,
    pub status_queries: Vec<(String, Option<String>)>,
}

/// Mock SdsRepository for testing
///
/// Every endpoint answers from JSON given up front, decoded the same way the
/// HTTP client decodes it, so the raw body travels with the typed value.
#[derive(Clone, Default)]
pub struct MockSdsRepository {
    search_body: Option<Value>,
    details_body: Option<Value>,
    revision_body: Option<Value>,
    upload_body: Option<Value>,
    failure: Option<&'static str>,
    replies: Arc<Mutex<VecDeque<StatusReply>>>,
    pub recorded: Arc<Mutex<Recorded>>,
}

#[allow(dead_code)]
impl MockSdsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, body: Value) -> Self {
        self.search_body = Some(body);
        self
    }

    /// Used for both the single and the batch details endpoint
    pub fn with_details(mut self, body: Value) -> Self {
        self.details_body = Some(body);
        self
    }

    /// Used for both the single and the batch revision endpoint
    pub fn with_revision(mut self, body: Value) -> Self {
        self.revision_body = Some(body);
        self
    }

    pub fn with_upload(mut self, body: Value) -> Self {
        self.upload_body = Some(body);
        self
    }

    pub fn with_status_replies(self, replies: Vec<StatusReply>) -> Self {
        *self.replies.lock().unwrap() = replies.into();
        self
    }

    /// Every call fails with this message
    pub fn with_failure(message: &'static str) -> Self {
        Self {
            failure: Some(message),
            ..Self::default()
        }
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(()),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    body: &Option<Value>,
    endpoint: &str,
) -> Result<ApiResponse<T>> {
    let raw = match body {
        Some(raw) => raw.clone(),
        None => anyhow::bail!("{} not scripted", endpoint),
    };
    let data = serde_json::from_value(raw.clone())?;
    Ok(ApiResponse::new(data, raw))
}

#[async_trait]
impl SdsRepository for MockSdsRepository {
    async fn search(&self, query: &SearchQuery) -> Result<ApiResponse<Vec<SdsSummary>>> {
        self.recorded.lock().unwrap().searches.push(query.clone());
        self.check_failure()?;
        decode(&self.search_body, "search")
    }

    async fn details(&self, lookup: &SdsLookup, fe: bool) -> Result<ApiResponse<SdsDetails>> {
        self.recorded
            .lock()
            .unwrap()
            .details
            .push((lookup.clone(), fe));
        self.check_failure()?;
        decode(&self.details_body, "details")
    }

    async fn multiple_details(
        &self,
        lookup: &SdsBatchLookup,
    ) -> Result<ApiResponse<Vec<SdsDetails>>> {
        self.recorded
            .lock()
            .unwrap()
            .batch_details
            .push(lookup.clone());
        self.check_failure()?;
        decode(&self.details_body, "multipleDetails")
    }

    async fn new_revision_info(&self, lookup: &SdsLookup) -> Result<ApiResponse<NewRevisionInfo>> {
        self.recorded.lock().unwrap().revisions.push(lookup.clone());
        self.check_failure()?;
        decode(&self.revision_body, "newRevisionInfo")
    }

    async fn multiple_new_revision_info(
        &self,
        lookup: &SdsBatchLookup,
    ) -> Result<ApiResponse<Vec<NewRevisionInfo>>> {
        self.recorded
            .lock()
            .unwrap()
            .batch_revisions
            .push(lookup.clone());
        self.check_failure()?;
        decode(&self.revision_body, "multipleNewRevisionInfo")
    }

    async fn upload(&self, request: &UploadRequest) -> Result<Value> {
        self.recorded.lock().unwrap().uploads.push(request.clone());
        self.check_failure()?;
        Ok(self
            .upload_body
            .clone()
            .unwrap_or_else(|| serde_json::json!({})))
    }

    async fn extraction_status(
        &self,
        request_id: &RequestId,
        email: Option<&str>,
    ) -> Result<ExtractionStatus> {
        self.recorded
            .lock()
            .unwrap()
            .status_queries
            .push((request_id.to_string(), email.map(str::to_string)));

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(StatusReply::Status(progress, step)) => Ok(ExtractionStatus::new(
                progress,
                ExtractionStep::from_wire(step),
            )),
            Some(StatusReply::Fail(message)) => anyhow::bail!("{}", message),
            None => anyhow::bail!("no status scripted"),
        }
    }
}
