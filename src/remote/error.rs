use thiserror::Error;

/// Failures talking to the account/document provider.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to remote service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote service returned {status} ({kind}): {message}")]
    Status {
        status: u16,
        kind: String,
        message: String,
    },
    #[error("unexpected response from remote service: {0}")]
    Decode(String),
    #[error("invalid remote endpoint: {0}")]
    Config(String),
}

impl RemoteError {
    pub(crate) fn status(status: u16, kind: &str, message: &str) -> Self {
        Self::Status {
            status,
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    /// The provider rejected the credentials (bad OTP, expired or unknown session).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}
