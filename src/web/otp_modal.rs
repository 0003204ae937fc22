//! OTP modal: code entry, verification and resend.

use axum::{
    extract::{Extension, Form},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{
    auth_form::{self, FormMode, FormOutcome, FormValues},
    html::escape,
    HOME_PATH, OTP_RESEND_PATH, OTP_VERIFY_PATH,
};
use crate::api::handlers::auth::{
    fields::{AccountId, Email, OtpCode},
    session::session_cookie,
    AuthState,
};

pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired code";

/// What the modal shows under the code input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Pending,
    Rejected,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpForm {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub mode: FormMode,
}

/// Modal markup. Both forms carry the account id and email as hidden fields.
pub fn render(mode: FormMode, account_id: &str, email: &str, outcome: VerifyOutcome) -> String {
    let account_id = escape(account_id);
    let email = escape(email);
    let mode_value = mode.as_str();
    let close = mode.path();
    let message = match outcome {
        VerifyOutcome::Pending => String::new(),
        VerifyOutcome::Rejected => {
            format!(r#"<p class="error-message" role="alert">{INVALID_CODE_MESSAGE}</p>"#)
        }
    };

    format!(
        r#"<div class="otp-overlay" role="dialog" aria-modal="true" aria-labelledby="otp-title">
<div class="shad-alert-dialog">
<form method="post" action="{OTP_VERIFY_PATH}">
<div class="flex justify-between">
<h2 id="otp-title" class="h2">Enter Your OTP</h2>
<a href="{close}" class="otp-close-button" aria-label="Close">&times;</a>
</div>
<p class="subtitle-2 text-center">We have sent an OTP to <span class="pl-1 text-brand">{email}</span></p>
<input type="hidden" name="accountId" value="{account_id}">
<input type="hidden" name="email" value="{email}">
<input type="hidden" name="mode" value="{mode_value}">
<input class="shad-otp" name="password" type="text" inputmode="text" autocomplete="one-time-code" minlength="6" maxlength="6" required>
{message}
<button type="submit" class="shad-submit-btn">Submit</button>
</form>
<form method="post" action="{OTP_RESEND_PATH}" class="subtitle-2 mt-2 text-center">
<input type="hidden" name="accountId" value="{account_id}">
<input type="hidden" name="email" value="{email}">
<input type="hidden" name="mode" value="{mode_value}">
Didn't get the code? <button type="submit" class="pl-1 text-brand">Click to resend</button>
</form>
</div>
</div>"#
    )
}

fn modal_page(form: &OtpForm, outcome: VerifyOutcome) -> String {
    auth_form::render_page(
        form.mode,
        &FormValues {
            full_name: String::new(),
            email: form.email.clone(),
        },
        &FormOutcome::OtpPending {
            account_id: form.account_id.clone(),
            verify: outcome,
        },
    )
}

/// `POST /otp/verify`: exchange the code for a session and land on the home page.
pub async fn verify(
    auth_state: Extension<Arc<AuthState>>,
    Form(form): Form<OtpForm>,
) -> Response {
    let parsed = AccountId::parse(&form.account_id)
        .and_then(|account_id| Ok((account_id, OtpCode::parse(&form.password)?)));
    let (account_id, code) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Rejected otp form: {err}");
            return (
                StatusCode::BAD_REQUEST,
                Html(modal_page(&form, VerifyOutcome::Rejected)),
            )
                .into_response();
        }
    };

    let session = match auth_state.verify_secret(&account_id, &code).await {
        Ok(session) => session,
        Err(err) => {
            return (
                err.status_code(),
                Html(modal_page(&form, VerifyOutcome::Rejected)),
            )
                .into_response();
        }
    };

    let cookie = match session_cookie(&session.secret) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return (
                StatusCode::BAD_GATEWAY,
                Html(modal_page(&form, VerifyOutcome::Rejected)),
            )
                .into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(LOCATION, HeaderValue::from_static(HOME_PATH));
    (StatusCode::SEE_OTHER, headers).into_response()
}

/// `POST /otp/resend`: ask for a fresh code; the modal stays on the same account id.
pub async fn resend(
    auth_state: Extension<Arc<AuthState>>,
    Form(form): Form<OtpForm>,
) -> Response {
    match Email::parse(&form.email) {
        Ok(email) => match auth_state.send_email_otp(&email).await {
            Ok(account_id) => info!("Resent one-time code for account {account_id}"),
            Err(err) => warn!("Failed to resend one-time code: {err}"),
        },
        Err(err) => warn!("Resend requested with {err}"),
    }

    Html(modal_page(&form, VerifyOutcome::Pending)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_pending_has_no_error() {
        let modal = render(FormMode::SignIn, "acc1", "ann@example.com", VerifyOutcome::Pending);
        assert!(modal.contains("Enter Your OTP"));
        assert!(modal.contains("We have sent an OTP to <span class=\"pl-1 text-brand\">ann@example.com</span>"));
        assert!(modal.contains("name=\"accountId\" value=\"acc1\""));
        assert!(modal.contains("href=\"/sign-in\""));
        assert!(!modal.contains(INVALID_CODE_MESSAGE));
    }

    #[test]
    fn render_rejected_shows_message_and_escapes() {
        let modal = render(
            FormMode::SignUp,
            "acc1",
            "<script>@x.com",
            VerifyOutcome::Rejected,
        );
        assert!(modal.contains(INVALID_CODE_MESSAGE));
        assert!(modal.contains("&lt;script&gt;@x.com"));
        assert!(!modal.contains("<script>"));
        assert!(modal.contains("href=\"/sign-up\""));
    }
}
