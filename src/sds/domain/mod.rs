pub mod api_key;
pub mod extraction;
pub mod query;
pub mod record;
pub mod transport_info;
pub mod upload;

pub use api_key::{ApiKey, API_KEY_HEADER};
pub use extraction::{
    ExtractionStatus, ExtractionStep, StepDisplay, StepIcon, StepOutcome, StepTone,
};
pub use query::{
    AdvancedSearch, SdsBatchLookup, SdsId, SdsLookup, SearchQuery, SearchType,
    DEFAULT_LANGUAGE_CODE, DEFAULT_PAGE_SIZE, DEFAULT_REGION,
};
pub use record::{ExtractedData, NewRevisionInfo, NewerSds, SdsDetails, SdsSummary, StatementCode};
pub use transport_info::{EntryValue, SentinelTag, TransportInfoColumn, ValueEntry};
pub use upload::{check_upload_size, RequestId, SelectedFile, UploadForm, UploadRequest};
