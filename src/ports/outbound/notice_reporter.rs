/// NoticeReporter port for short-lived, dismissible user notices
///
/// The HTTP adapter uses it to surface the server-supplied `detail` message
/// of a failed request. It is the only cross-cutting error display.
pub trait NoticeReporter: Send + Sync {
    /// Shows a notice to the user
    fn notify(&self, message: &str);
}

/// Notice sink that drops everything
pub struct SilentNotices;

impl NoticeReporter for SilentNotices {
    fn notify(&self, _message: &str) {}
}
