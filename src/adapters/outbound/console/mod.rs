/// Console adapters for stderr feedback
mod notice_reporter;
mod progress_reporter;

pub use notice_reporter::ConsoleNoticeReporter;
pub use progress_reporter::StderrProgressReporter;
