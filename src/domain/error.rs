use thiserror::Error;

/// ChatKit relay unified error type
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Relay is misconfigured: {message}")]
    Misconfigured { message: String },

    #[error("Upstream session service unavailable: {message}")]
    UpstreamUnavailable { message: String, timed_out: bool },

    #[error("Upstream session service returned status {status}")]
    UpstreamError { status: u16, body: String },

    #[error("Upstream response violated the session contract: {0}")]
    UpstreamContractViolation(String),

    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Network error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

pub type RelayResult<T> = Result<T, RelayError>;

impl RelayError {
    /// Create a `Misconfigured` error naming the missing setting.
    ///
    /// Only the setting's name may appear in the message; values of
    /// secrets must never travel through here.
    pub fn missing_setting(name: &str) -> Self {
        Self::Misconfigured {
            message: format!("{} is not set", name),
        }
    }
}
