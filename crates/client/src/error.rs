use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::ApiClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a usable response.
    #[error("Network error. Please try again.")]
    Network(#[source] reqwest::Error),

    /// A protected endpoint was called without a session.
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Session file error: {0}")]
    SessionIo(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    SessionFormat(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Builds an [`ClientError::Api`] from an error response body.
///
/// Keeps the server's `message` verbatim, falling back to the status reason
/// for bodies that are not in the standard error shape.
pub(crate) fn api_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    ClientError::Api { status, message }
}
