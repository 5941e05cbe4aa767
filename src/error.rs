//! Error types for the directory API and the report merge

use thiserror::Error;

/// Failures talking to Microsoft Graph / AAD Graph
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request to {url} failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("Invalid CA certificate: {0}")]
    Certificate(String),

    #[error("No organization returned for the signed-in tenant")]
    EmptyOrganization,
}

/// Per-record data inconsistency found while merging. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeWarning {
    #[error("registration record #{index} has no user id, skipping row")]
    RegistrationWithoutId { index: usize },

    #[error("user detail record #{index} has no id, ignoring it")]
    DetailWithoutId { index: usize },

    #[error("duplicate user detail record for {user_id}, keeping the first")]
    DuplicateDetail { user_id: String },

    #[error("malformed {field} timestamp {value:?} for user {user_id}")]
    MalformedTimestamp {
        user_id: String,
        field: &'static str,
        value: String,
    },
}
