/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (SDS API, console, key file, etc.).
pub mod api_key_store;
pub mod formatter;
pub mod notice_reporter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sds_repository;

pub use api_key_store::ApiKeyStore;
pub use formatter::ResponseFormatter;
pub use notice_reporter::{NoticeReporter, SilentNotices};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sds_repository::{ApiResponse, SdsRepository};
