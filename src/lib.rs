//! sds-client - command-line client for the SDS search API
//!
//! Searches Safety Data Sheets, fetches their details and revision status,
//! and uploads new SDS PDFs while following their server-side extraction.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sds`): SDS records, queries, extraction steps, the
//!   transport-information pivot and the upload phase machine
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP client, console, filesystem, formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sds_client::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let settings = ClientSettings::default();
//! let client = SdsApiClient::new(&settings, Arc::new(SilentNotices))?;
//!
//! let use_case = SearchSdsUseCase::new(client);
//! let response = use_case
//!     .execute(SearchQuery::new(Some("acetone".to_string())))
//!     .await?;
//!
//! let output = MarkdownFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sds;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{ConsoleNoticeReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        read_upload_file, FileApiKeyStore, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::{ApiError, ClientSettings, SdsApiClient};
    pub use crate::application::dto::{LookupRequest, OutputFormat, SdsResponse, UploadOutcome};
    pub use crate::application::use_cases::{
        RevisionInfoUseCase, SdsDetailsUseCase, SearchSdsUseCase, UploadSdsUseCase,
    };
    pub use crate::ports::outbound::{
        ApiKeyStore, ApiResponse, NoticeReporter, OutputPresenter, ProgressReporter,
        ResponseFormatter, SdsRepository, SilentNotices,
    };
    pub use crate::sds::domain::{
        ApiKey, ExtractionStatus, ExtractionStep, RequestId, SdsLookup, SearchQuery,
        SelectedFile, UploadForm,
    };
    pub use crate::sds::services::{MatrixPivot, PivotTable, UploadPhase};
    pub use crate::shared::Result;
}
