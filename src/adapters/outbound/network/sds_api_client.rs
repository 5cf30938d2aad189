use super::api_error::{classify_failure, ApiError};
use crate::ports::outbound::{ApiResponse, NoticeReporter, SdsRepository};
use crate::sds::domain::{
    ApiKey, ExtractionStatus, NewRevisionInfo, RequestId, SdsBatchLookup, SdsDetails, SdsLookup,
    SdsSummary, SearchQuery, UploadRequest, API_KEY_HEADER,
};
use crate::shared::error::SdsError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(50);
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

const SEARCH_PATH: &str = "sds/search/";
const DETAILS_PATH: &str = "sds/details/";
const MULTIPLE_DETAILS_PATH: &str = "sds/multipleDetails/";
const NEW_REVISION_INFO_PATH: &str = "sds/newRevisionInfo/";
const MULTIPLE_NEW_REVISION_INFO_PATH: &str = "sds/multipleNewRevisionInfo/";
const UPLOAD_PATH: &str = "sds/upload/";
const EXTRACTION_STATUS_PATH: &str = "sds/getExtractionStatus/";

/// Resolved connection settings for the SDS API
///
/// Built once from flags, config file and key store, then handed to the
/// client explicitly.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_key: Option<ApiKey>,
    pub timeout: Duration,
    pub upload_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }
}

impl ClientSettings {
    /// Parses the base URL, accepting only absolute http(s) URLs
    ///
    /// The returned URL always ends with `/` so endpoint paths join below it.
    pub fn parse_base_url(raw: &str) -> std::result::Result<Url, SdsError> {
        let invalid = |reason: String| SdsError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };

        let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{}'", other))),
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query strings and fragments are not allowed".to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

/// SdsApiClient adapter for the SDS search HTTP API
///
/// Implements the SdsRepository port on top of an async reqwest client that
/// carries the JSON and API key headers on every request. Failed responses
/// are classified in one place; a server `detail` message is forwarded to the
/// NoticeReporter before the error is returned.
///
/// Requests are never retried.
pub struct SdsApiClient {
    client: reqwest::Client,
    base_url: Url,
    upload_timeout: Duration,
    notices: Arc<dyn NoticeReporter>,
}

impl SdsApiClient {
    /// Creates a client from resolved settings
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid, the API key cannot be
    /// used as a header value, or the HTTP client fails to build
    pub fn new(settings: &ClientSettings, notices: Arc<dyn NoticeReporter>) -> Result<Self> {
        let base_url = ClientSettings::parse_base_url(&settings.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &settings.api_key {
            let mut value = HeaderValue::from_str(key.expose())
                .map_err(|_| anyhow::anyhow!("API key contains characters not allowed in an HTTP header"))?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_bytes(API_KEY_HEADER.as_bytes())?, value);
        }

        let user_agent = format!("sds-client/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        tracing::debug!(
            base_url = %base_url,
            api_key = settings.api_key.is_some(),
            "SDS API client ready"
        );

        Ok(Self {
            client,
            base_url,
            upload_timeout: settings.upload_timeout,
            notices,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn search_request(&self, query: &SearchQuery) -> Result<RequestBuilder> {
        Ok(self
            .client
            .post(self.endpoint(SEARCH_PATH)?)
            .query(&[("page", query.page), ("page_size", query.page_size)])
            .json(query))
    }

    fn details_request(&self, lookup: &SdsLookup, fe: bool) -> Result<RequestBuilder> {
        let mut request = self.client.post(self.endpoint(DETAILS_PATH)?);
        if fe {
            request = request.query(&[("fe", "true")]);
        }
        Ok(request.json(lookup))
    }

    fn revision_request(&self, lookup: &SdsLookup) -> Result<RequestBuilder> {
        Ok(self
            .client
            .post(self.endpoint(NEW_REVISION_INFO_PATH)?)
            .json(&lookup.without_language()))
    }

    fn batch_request(&self, path: &str, lookup: &SdsBatchLookup) -> Result<RequestBuilder> {
        Ok(self.client.post(self.endpoint(path)?).json(lookup))
    }

    fn upload_request(&self, request: &UploadRequest) -> Result<RequestBuilder> {
        let file = Part::bytes(request.file.bytes.clone())
            .file_name(request.file.name.clone())
            .mime_str("application/pdf")?;

        let mut form = Form::new()
            .part("file", file)
            .text("sku", request.sku.clone())
            .text("upc_ean", request.upc_ean.clone())
            .text("product_code", request.product_code.clone())
            .text("private_import", request.private_import.to_string())
            .text("request_id", request.request_id.to_string());
        if let Some(email) = &request.email {
            form = form.text("email", email.clone());
        }

        Ok(self
            .client
            .post(self.endpoint(UPLOAD_PATH)?)
            .timeout(self.upload_timeout)
            .multipart(form))
    }

    fn status_request(&self, request_id: &RequestId, email: Option<&str>) -> Result<RequestBuilder> {
        let mut params = vec![("request_id", request_id.as_str())];
        if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
            params.push(("email", email));
        }
        Ok(self
            .client
            .get(self.endpoint(EXTRACTION_STATUS_PATH)?)
            .query(&params))
    }

    /// Sends a request and applies the shared failure handling
    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> std::result::Result<serde_json::Value, ApiError> {
        tracing::debug!(endpoint, "SDS API request");

        let transport = |source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let error = classify_failure(status, &body);
            if let Some(notice) = error.notice() {
                self.notices.notify(notice);
            }
            tracing::warn!(endpoint, %status, "SDS API request failed");
            return Err(error);
        }

        tracing::debug!(endpoint, %status, bytes = body.len(), "SDS API response");
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn send_typed<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> std::result::Result<ApiResponse<T>, ApiError> {
        let raw = self.send(endpoint, request).await?;
        let data = T::deserialize(&raw).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;
        Ok(ApiResponse::new(data, raw))
    }
}

#[async_trait]
impl SdsRepository for SdsApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<ApiResponse<Vec<SdsSummary>>> {
        let request = self.search_request(query)?;
        Ok(self.send_typed(SEARCH_PATH, request).await?)
    }

    async fn details(&self, lookup: &SdsLookup, fe: bool) -> Result<ApiResponse<SdsDetails>> {
        let request = self.details_request(lookup, fe)?;
        Ok(self.send_typed(DETAILS_PATH, request).await?)
    }

    async fn multiple_details(
        &self,
        lookup: &SdsBatchLookup,
    ) -> Result<ApiResponse<Vec<SdsDetails>>> {
        let request = self.batch_request(MULTIPLE_DETAILS_PATH, lookup)?;
        Ok(self.send_typed(MULTIPLE_DETAILS_PATH, request).await?)
    }

    async fn new_revision_info(&self, lookup: &SdsLookup) -> Result<ApiResponse<NewRevisionInfo>> {
        let request = self.revision_request(lookup)?;
        Ok(self.send_typed(NEW_REVISION_INFO_PATH, request).await?)
    }

    async fn multiple_new_revision_info(
        &self,
        lookup: &SdsBatchLookup,
    ) -> Result<ApiResponse<Vec<NewRevisionInfo>>> {
        let request = self.batch_request(MULTIPLE_NEW_REVISION_INFO_PATH, lookup)?;
        Ok(self
            .send_typed(MULTIPLE_NEW_REVISION_INFO_PATH, request)
            .await?)
    }

    async fn upload(&self, request: &UploadRequest) -> Result<serde_json::Value> {
        let builder = self.upload_request(request)?;
        Ok(self.send(UPLOAD_PATH, builder).await?)
    }

    async fn extraction_status(
        &self,
        request_id: &RequestId,
        email: Option<&str>,
    ) -> Result<ExtractionStatus> {
        let request = self.status_request(request_id, email)?;
        let response: ApiResponse<ExtractionStatus> =
            self.send_typed(EXTRACTION_STATUS_PATH, request).await?;
        Ok(response.data)
    }
}
