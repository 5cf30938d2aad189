use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy of the SDS HTTP API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access denied by the SDS API (403 Forbidden)\n\n💡 Hint: Check that your API key is valid. Set one with `sds-client api-key set <KEY>`")]
    Forbidden { body: String },

    #[error("{detail}")]
    Detail { status: StatusCode, detail: String },

    #[error("SDS API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Request to {endpoint} failed: {source}\n\n💡 Hint: Check that the SDS API is reachable at the configured base URL")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response body from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Message to show as a transient notice, if this error carries one
    pub fn notice(&self) -> Option<&str> {
        match self {
            ApiError::Detail { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            ApiError::Detail { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status(),
            ApiError::Decode { .. } => None,
        }
    }
}

/// Classifies a non-success response
///
/// 403 always wins over a `detail` message; a `detail` is only picked up when
/// it is a JSON string.
pub fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::FORBIDDEN {
        return ApiError::Forbidden {
            body: body.to_string(),
        };
    }

    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            _ => None,
        });

    match detail {
        Some(detail) => ApiError::Detail { status, detail },
        None => ApiError::Status {
            status,
            body: body.to_string(),
        },
    }
}
