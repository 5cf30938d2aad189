use crate::application::dto::SdsResponse;
use crate::shared::Result;

/// ResponseFormatter port for rendering API responses
///
/// Implementations decide between the raw JSON view and a formatted,
/// human-readable one.
pub trait ResponseFormatter {
    /// Renders a response
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &SdsResponse) -> Result<String>;
}
