use super::fields::FieldError;
use crate::remote::RemoteError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    InvalidInput(#[from] FieldError),
    #[error("failed to send email OTP")]
    OtpDelivery(#[source] RemoteError),
    #[error("failed to send email OTP: no account id issued")]
    MissingAccountId,
    #[error("failed to verify otp")]
    InvalidCode(#[source] RemoteError),
    #[error("session rejected by provider")]
    SessionRejected(#[source] RemoteError),
    #[error("remote service error: {0}")]
    Remote(#[from] RemoteError),
}

impl AuthError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCode(_) | Self::SessionRejected(_) => StatusCode::UNAUTHORIZED,
            Self::OtpDelivery(_) | Self::MissingAccountId | Self::Remote(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Message safe to hand back to callers; provider details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidInput(field) => field.to_string(),
            Self::OtpDelivery(_) | Self::MissingAccountId => "failed to send email OTP".to_string(),
            Self::InvalidCode(_) => "failed to verify otp".to_string(),
            Self::SessionRejected(_) => "session rejected".to_string(),
            Self::Remote(_) => "remote service unavailable".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            AuthError::from(FieldError::Email).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCode(RemoteError::status(401, "user_invalid_token", "bad"))
                .status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::MissingAccountId.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AuthError::from(RemoteError::Decode("x".to_string())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn public_message_hides_provider_detail() {
        let err = AuthError::from(RemoteError::status(500, "general_unknown", "db exploded"));
        assert_eq!(err.public_message(), "remote service unavailable");
        assert!(err.to_string().contains("db exploded"));
    }
}
