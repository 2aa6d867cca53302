use serde::Serialize;
use serde_json::Value;

use crate::error::AdapterError;

/// Uniform result of every adapter operation.
///
/// Serializes either as the upstream body, untouched, or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultEnvelope {
    /// Decoded upstream body. Its shape belongs to ActiveCampaign, including any
    /// failure indicators it reports itself.
    Upstream(Value),
    /// Failure produced by this adapter before or during the round trip
    Error { error: String },
}

impl ResultEnvelope {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Upstream(body) => body,
            Self::Error { error } => serde_json::json!({ "error": error }),
        }
    }
}

impl From<Result<Value, AdapterError>> for ResultEnvelope {
    fn from(result: Result<Value, AdapterError>) -> Self {
        match result {
            Ok(body) => Self::Upstream(body),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
