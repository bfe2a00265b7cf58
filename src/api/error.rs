use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Failure reported by the hosted backend or the transport in front of it.
///
/// `Display` is the backend's own message so it can be shown to the user verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Remote { status: StatusCode, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Union of the error body shapes used by the auth and data APIs.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg.or(self.error_description).or(self.message).or(self.error)
    }
}

impl ApiError {
    /// Extracts the human-readable message from an error response body.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| match body.trim() {
                "" => status.canonical_reason().unwrap_or("Request failed").to_string(),
                text => text.to_string(),
            });
        ApiError::Remote { status, message }
    }

    pub async fn from_response(res: Response) -> Self {
        let status = res.status();
        match res.text().await {
            Ok(body) => Self::from_body(status, &body),
            Err(e) => ApiError::Transport(e),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
        }
    }
}

/// Turns a non-success response into an [`ApiError`], passing successes through.
pub async fn check(res: Response) -> Result<Response, ApiError> {
    if res.status().is_success() {
        Ok(res)
    } else {
        Err(ApiError::from_response(res).await)
    }
}
