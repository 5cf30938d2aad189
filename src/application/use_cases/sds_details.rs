use crate::application::dto::{LookupRequest, SdsResponse};
use crate::ports::outbound::SdsRepository;
use crate::shared::Result;

/// SdsDetailsUseCase - full SDS records by id or PDF MD5
pub struct SdsDetailsUseCase<REPO> {
    repository: REPO,
}

impl<REPO: SdsRepository> SdsDetailsUseCase<REPO> {
    pub fn new(repository: REPO) -> Self {
        Self { repository }
    }

    /// Fetches one record, or several through the batch endpoint
    ///
    /// `fe` only applies to single lookups; the batch endpoint has no such flag.
    pub async fn execute(&self, request: LookupRequest, fe: bool) -> Result<SdsResponse> {
        match request {
            LookupRequest::Single(lookup) => {
                tracing::info!(?lookup, fe, "fetching SDS details");
                let response = self.repository.details(&lookup, fe).await?;
                Ok(SdsResponse::Details(response))
            }
            LookupRequest::Batch(lookup) => {
                if fe {
                    tracing::warn!("--fe is ignored for batch lookups");
                }
                tracing::info!(count = lookup.len(), "fetching SDS details in batch");
                let response = self.repository.multiple_details(&lookup).await?;
                Ok(SdsResponse::DetailsBatch(response))
            }
        }
    }
}
