use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by the aggregation gateway to its HTTP callers.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    #[error("All upstream sub-queries failed for {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream responded with status {status}: {body}")]
    UpstreamError { status: u16, body: String },

    /// JSON-RPC level error returned inside a successful HTTP response.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("{0}")]
    NoDataFound(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Malformed upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::TransportError(e.to_string())
        }
    }
}

/// Failures seen by the shell when talking to the gateway.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The gateway answered with a non-success status and an `{error}` body.
    #[error("{message}")]
    Gateway { status: u16, message: String },

    #[error("Failed to reach the gateway: {0}")]
    Transport(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Unexpected gateway response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ShellError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ShellError::Transport(format!("timed out: {}", e))
        } else if e.is_decode() {
            ShellError::Decode(e.to_string())
        } else {
            ShellError::Transport(e.to_string())
        }
    }
}
