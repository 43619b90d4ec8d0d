use thiserror::Error;

/// Errors related to style storage.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("style name is empty after removing disallowed characters")]
    InvalidName,

    #[error("style '{0}' not found")]
    NotFound(String),

    #[error("prompt for style '{0}' not found")]
    PromptNotFound(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors returned by the rewrite service behind the gateway.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("model call failed: {0}")]
    ModelCall(String),
}

/// Errors seen by a client of the rewrite gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway answered with a non-success status.
    #[error("rewrite gateway error (status {status}): {detail}")]
    Remote { status: u16, detail: String },

    #[error("rewrite gateway unreachable: {0}")]
    Transport(String),

    #[error("malformed rewrite gateway response: {0}")]
    Malformed(String),
}

/// Errors from the chat transport (sending, downloading).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport request failed: {0}")]
    Request(String),

    #[error("transport API error: {0}")]
    Api(String),

    #[error("file download failed: {0}")]
    Download(String),
}
