use crate::models::ErrorPayload;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error while uploading file.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Unexpected response from server.";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please select a file first")]
    NoFileSelected,

    #[error("upload rejected with {status}: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("malformed upload response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UploadError {
    /// Text shown to the user when this error ends a submission.
    pub fn display_message(&self) -> String {
        match self {
            UploadError::Rejected { message, .. } => message.clone(),
            UploadError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            UploadError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub fn rejection_message(status: StatusCode, payload: &ErrorPayload) -> String {
    let fallback = match status.as_u16() {
        400 => "File too large or invalid upload.",
        409 => "File already exists in the upload folder.",
        413 => "File too large to upload.",
        code => return format!("Unexpected error: {}", code),
    };

    // An empty detail counts as absent.
    match payload.detail.as_deref() {
        Some(detail) if !detail.is_empty() => detail.to_string(),
        _ => fallback.to_string(),
    }
}
