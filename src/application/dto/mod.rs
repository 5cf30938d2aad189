/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into use cases and results back out to
/// the formatters, keeping the domain layer isolated.
mod lookup_request;
mod output_format;
mod sds_response;
mod upload_outcome;

pub use lookup_request::LookupRequest;
pub use output_format::OutputFormat;
pub use sds_response::SdsResponse;
pub use upload_outcome::UploadOutcome;
