//! Session cookie handling plus the current-user and sign-out endpoints.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, error};

use super::{error::AuthError, state::AuthState, types::UserResponse};
use crate::web::SIGN_IN_PATH;

pub const SESSION_COOKIE_NAME: &str = "appwrite-session";

#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Signed-in user", body = UserResponse),
        (status = 204, description = "No active session or no user document"),
        (status = 502, description = "Provider failure")
    ),
    tag = "auth"
)]
pub async fn me(headers: HeaderMap, auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    let session = extract_session_secret(&headers);
    match auth_state.current_user(session.as_ref()).await {
        Ok(Some(user)) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(AuthError::SessionRejected(err)) => {
            debug!("Session rejected: {err}");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            error!("Failed to resolve current user: {err}");
            err.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/sign-out",
    responses(
        (status = 303, description = "Session cleared, redirect to the sign-in page")
    ),
    tag = "auth"
)]
pub async fn sign_out(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let session = extract_session_secret(&headers);
    // Deletion failures are already logged; the browser is signed out regardless.
    let _ = auth_state.sign_out(session.as_ref()).await;
    signed_out_redirect()
}

/// 303 to the sign-in page with the session cookie cleared.
pub(crate) fn signed_out_redirect() -> Response {
    let mut response_headers = HeaderMap::new();
    response_headers.insert(LOCATION, HeaderValue::from_static(SIGN_IN_PATH));
    response_headers.insert(SET_COOKIE, clear_session_cookie());
    (StatusCode::SEE_OTHER, response_headers).into_response()
}

/// Build the `HttpOnly` cookie carrying the provider session secret.
pub(crate) fn session_cookie(secret: &SecretString) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={}; Path=/; Secure; HttpOnly; SameSite=Strict",
        secret.expose_secret()
    ))
}

pub(crate) fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("appwrite-session=; Path=/; Secure; HttpOnly; SameSite=Strict; Max-Age=0")
}

/// Session secret from the `Cookie` header, if present and non-empty.
pub(crate) fn extract_session_secret(headers: &HeaderMap) -> Option<SecretString> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            let val = val.trim();
            (key.trim() == SESSION_COOKIE_NAME && !val.is_empty())
                .then(|| SecretString::from(val.to_string()))
        })
}
