use super::models::{RecordType, Unresolved};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnsError {
    #[error("request to DNS API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode DNS API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("DNS API returned {status}: {message}")]
    Provider { status: StatusCode, message: String },

    #[error("cannot update {record_type} record '{name}': {reason}")]
    Unresolved {
        name: String,
        record_type: RecordType,
        reason: Unresolved,
    },

    #[error("update rejected with {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}
