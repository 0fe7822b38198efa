use reqwest::StatusCode;
use thiserror::Error;

use crate::models::DataSourceSelection;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Database {database_id} has no data sources")]
    NoDataSource { database_id: String },

    #[error("Database {database_id} has no data source matching {selection}")]
    DataSourceNotFound {
        database_id: String,
        selection: DataSourceSelection,
    },

    #[error("Request failed with status {status}: {}", truncate_body(.body))]
    RequestFailed { status: StatusCode, body: String },

    #[error("Failed to decode JSON response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

impl ApiError {
    /// Build a `RequestFailed` from a non-success response. The body is kept whole.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        ApiError::RequestFailed {
            status,
            body: body.to_string(),
        }
    }

    /// HTTP status of a failed request, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_client_error())
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
