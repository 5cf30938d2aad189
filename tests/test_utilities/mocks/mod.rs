/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_sds_repository;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_sds_repository::{MockSdsRepository, StatusReply};
