use crate::application::dto::{LookupRequest, SdsResponse};
use crate::ports::outbound::SdsRepository;
use crate::shared::Result;

/// RevisionInfoUseCase - asks whether newer revisions of known SDSs exist
pub struct RevisionInfoUseCase<REPO> {
    repository: REPO,
}

impl<REPO: SdsRepository> RevisionInfoUseCase<REPO> {
    pub fn new(repository: REPO) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: LookupRequest) -> Result<SdsResponse> {
        let response = match request {
            LookupRequest::Single(lookup) => {
                tracing::info!(?lookup, "checking for newer revision");
                SdsResponse::RevisionInfo(self.repository.new_revision_info(&lookup).await?)
            }
            LookupRequest::Batch(lookup) => {
                tracing::info!(count = lookup.len(), "checking for newer revisions");
                SdsResponse::RevisionInfoBatch(
                    self.repository.multiple_new_revision_info(&lookup).await?,
                )
            }
        };
        Ok(response)
    }
}
