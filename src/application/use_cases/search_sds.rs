use crate::application::dto::SdsResponse;
use crate::ports::outbound::SdsRepository;
use crate::sds::domain::SearchQuery;
use crate::shared::Result;

/// SearchSdsUseCase - one page of SDS search results
pub struct SearchSdsUseCase<REPO> {
    repository: REPO,
}

impl<REPO: SdsRepository> SearchSdsUseCase<REPO> {
    pub fn new(repository: REPO) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, query: SearchQuery) -> Result<SdsResponse> {
        tracing::info!(
            search = query.search.as_deref().unwrap_or(""),
            page = query.page,
            page_size = query.page_size,
            advanced = query.advanced_search.is_some(),
            "searching SDS"
        );
        let response = self.repository.search(&query).await?;
        tracing::info!(results = response.data.len(), "search finished");
        Ok(SdsResponse::Search(response))
    }
}
