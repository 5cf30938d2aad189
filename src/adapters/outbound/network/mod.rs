/// Network adapters for the SDS HTTP API
mod api_error;
mod sds_api_client;

pub use api_error::{classify_failure, ApiError};
pub use sds_api_client::{
    ClientSettings, SdsApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_UPLOAD_TIMEOUT,
};
