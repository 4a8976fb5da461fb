use pix_types::errors::ValidationError;
use thiserror::Error;

/// Failure talking to one of the remote collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status_code}: {body}")]
    Status { status_code: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("{endpoint} did not answer within {after_ms} ms")]
    Timeout { endpoint: &'static str, after_ms: u64 },
}

/// Central error type for the transfer and report flows.
///
/// None of these escape the flows: each is turned into a notification or a
/// result screen before the flow returns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("A transfer is already in progress")]
    TransferInFlight,

    #[error("Security analysis failed: {0}")]
    Analysis(String),

    #[error("Transfer processing unconfirmed: {0}")]
    ProcessingSoft(String),

    #[error("Report submission failed: {0}")]
    ReportSubmission(String),
}

/// Invalid configuration value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
