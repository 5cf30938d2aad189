use crate::application::dto::SdsResponse;
use crate::ports::outbound::ResponseFormatter;
use crate::shared::Result;

/// JsonFormatter adapter emitting the raw response body, pretty-printed
///
/// API responses are written exactly as received, including fields the
/// client does not model.
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ResponseFormatter for JsonFormatter {
    fn format(&self, response: &SdsResponse) -> Result<String> {
        let value = response.raw_json()?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
