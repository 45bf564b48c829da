//! # Jupiter API Types
//!
//! Error envelopes returned by the Jupiter API. Quote and swap payloads are
//! the shared DTOs in [`lib_core::dto`].

use serde::Deserialize;

/// Error body, in any of the shapes Jupiter has used:
/// `{"error": "..."}`, `{"error": {"message": "..."}}` or `{"message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct JupiterErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorField>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "errorCode")]
    pub error_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    Text(String),
    Detailed { message: String },
}

impl JupiterErrorResponse {
    pub fn message(&self) -> Option<String> {
        let from_error = match &self.error {
            Some(ErrorField::Text(text)) => Some(text.clone()),
            Some(ErrorField::Detailed { message }) => Some(message.clone()),
            None => None,
        };

        from_error
            .or_else(|| self.message.clone())
            .or_else(|| self.error_code.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Extract the provider's own message from an error body.
///
/// Falls back to the raw text when the body is not JSON; returns `None` for
/// JSON bodies that carry no error field (i.e. regular payloads).
pub fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) if value.is_object() => serde_json::from_value::<JupiterErrorResponse>(value)
            .ok()
            .and_then(|e| e.message()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
