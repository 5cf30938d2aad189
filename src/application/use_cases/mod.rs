/// Use cases module containing application business logic orchestration
mod revision_info;
mod sds_details;
mod search_sds;
mod upload_sds;

pub use revision_info::RevisionInfoUseCase;
pub use sds_details::SdsDetailsUseCase;
pub use search_sds::SearchSdsUseCase;
pub use upload_sds::{UploadSdsUseCase, DEFAULT_POLL_INTERVAL};
