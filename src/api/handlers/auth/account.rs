//! Sign-up and sign-in endpoints.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{
    actions::{NewAccount, SignInOutcome},
    error::AuthError,
    fields::{Email, FullName},
    state::AuthState,
    types::{AccountResponse, SignInRequest, SignUpRequest},
};

pub const USER_NOT_FOUND: &str = "user not found";

#[utoipa::path(
    post,
    path = "/v1/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Code emailed, user document ensured", body = AccountResponse),
        (status = 400, description = "Invalid full name or email"),
        (status = 502, description = "Provider failure")
    ),
    tag = "auth"
)]
pub async fn sign_up(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<SignUpRequest>>,
) -> impl IntoResponse {
    let request: SignUpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let account = match FullName::parse(&request.full_name)
        .and_then(|full_name| {
            Ok(NewAccount {
                full_name,
                email: Email::parse(&request.email)?,
            })
        }) {
        Ok(account) => account,
        Err(err) => return AuthError::from(err).into_response(),
    };

    match auth_state.create_account(&account).await {
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
    path = "/v1/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Code emailed, or accountId null when no user exists", body = AccountResponse),
        (status = 400, description = "Invalid email"),
        (status = 502, description = "Provider failure")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<SignInRequest>>,
) -> impl IntoResponse {
    let request: SignInRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = match Email::parse(&request.email) {
        Ok(email) => email,
        Err(err) => return AuthError::from(err).into_response(),
    };

    match auth_state.sign_in(&email).await {
        Ok(SignInOutcome::Found(account_id)) => Json(AccountResponse {
            account_id: Some(account_id.to_string()),
            error: None,
        })
        .into_response(),
        Ok(SignInOutcome::NotFound) => Json(AccountResponse {
            account_id: None,
            error: Some(USER_NOT_FOUND.to_string()),
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}
