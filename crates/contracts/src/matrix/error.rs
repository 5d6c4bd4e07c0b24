use serde::Deserialize;
use thiserror::Error;

/// Structured error code the backend sends for a violated unique constraint.
pub const UNIQUE_VIOLATION_CODE: &str = "unique_violation";

/// Legacy marker in `non_field_errors` messages from older backends that
/// only report the constraint as human-readable text.
const UNIQUE_SET_MARKER: &str = "must make a unique set";

/// Parsed body of a 4xx/5xx response, as far as the backend provides one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub non_field_errors: Vec<String>,
}

impl ApiErrorBody {
    /// Whether this body reports a (cabinetType, brandName) uniqueness
    /// conflict. The structured code wins; the message marker is a fallback
    /// for backends that predate it.
    pub fn is_unique_conflict(&self) -> bool {
        if self.code.as_deref() == Some(UNIQUE_VIOLATION_CODE) {
            return true;
        }
        self.non_field_errors
            .iter()
            .any(|m| m.contains(UNIQUE_SET_MARKER))
    }

    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or_else(|| self.non_field_errors.first().map(String::as_str))
    }
}

/// Failure of one REST call. Never panics through to the caller; the matrix
/// flow converts everything into a result the UI can render.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("failed to decode server response: {0}")]
    Decode(String),
    #[error("server rejected the request ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        body: Option<ApiErrorBody>,
    },
}

impl ApiError {
    /// Build from a non-2xx response, keeping the parsed body around for
    /// conflict classification.
    pub fn from_response(status: u16, raw_body: &str) -> Self {
        let body: Option<ApiErrorBody> = serde_json::from_str(raw_body).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.message())
            .unwrap_or(raw_body)
            .to_string();
        ApiError::Rejected {
            status,
            message,
            body,
        }
    }

    pub fn is_unique_conflict(&self) -> bool {
        match self {
            ApiError::Rejected {
                body: Some(body), ..
            } => body.is_unique_conflict(),
            _ => false,
        }
    }

    /// Short text suitable for an inline error or toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Check your connection.".into(),
            ApiError::Decode(_) => "The server sent an unexpected response.".into(),
            ApiError::Rejected { message, .. } => message.clone(),
        }
    }
}
