//! One-time code issuance and verification.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::error;

use super::{
    error::AuthError,
    fields::{AccountId, Email, OtpCode},
    session::session_cookie,
    state::AuthState,
    types::{AccountResponse, SendOtpRequest, SessionResponse, VerifyRequest},
};

#[utoipa::path(
    post,
    path = "/v1/auth/otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code emailed", body = AccountResponse),
        (status = 400, description = "Invalid email"),
        (status = 502, description = "failed to send email OTP")
    ),
    tag = "auth"
)]
pub async fn send_otp(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<SendOtpRequest>>,
) -> impl IntoResponse {
    let request: SendOtpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = match Email::parse(&request.email) {
        Ok(email) => email,
        Err(err) => return AuthError::from(err).into_response(),
    };

    match auth_state.send_email_otp(&email).await {
        Ok(account_id) => Json(AccountResponse {
            account_id: Some(account_id.to_string()),
            error: None,
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Session created, cookie set", body = SessionResponse),
        (status = 400, description = "Malformed account id or code"),
        (status = 401, description = "failed to verify otp"),
        (status = 502, description = "Provider failure")
    ),
    tag = "auth"
)]
pub async fn verify(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<VerifyRequest>>,
) -> impl IntoResponse {
    let request: VerifyRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let parsed = AccountId::parse(&request.account_id)
        .and_then(|account_id| Ok((account_id, OtpCode::parse(&request.password)?)));
    let (account_id, code) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return AuthError::from(err).into_response(),
    };

    let session = match auth_state.verify_secret(&account_id, &code).await {
        Ok(session) => session,
        Err(err) => return err.into_response(),
    };

    let cookie = match session_cookie(&session.secret) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    (
        StatusCode::OK,
        headers,
        Json(SessionResponse {
            session_id: session.session_id,
        }),
    )
        .into_response()
}
