//! The sign-in / sign-up form and its submission handlers.

use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::{fmt::Write, sync::Arc};
use tracing::error;

use super::{
    html::escape,
    layout::auth_layout,
    otp_modal::{self, VerifyOutcome},
    SIGN_IN_PATH, SIGN_UP_PATH,
};
use crate::api::handlers::auth::{
    fields::{Email, FieldError, FullName},
    AuthState, NewAccount, SignInOutcome,
};

pub const FAILED_MESSAGE: &str = "failed to create account";
pub const NOT_FOUND_MESSAGE: &str =
    "No user found. Please sign up if you don't have an account or try again later.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormMode {
    #[default]
    SignIn,
    SignUp,
}

impl FormMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::SignIn => SIGN_IN_PATH,
            Self::SignUp => SIGN_UP_PATH,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
        }
    }

    const fn other(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    const fn switch_prompt(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account?",
            Self::SignUp => "Already have an account?",
        }
    }
}

/// Raw submitted values, echoed back when the form is re-rendered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormValues {
    #[serde(default, rename = "fullname")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Idle,
    Invalid(FieldError),
    Failed,
    NotFound,
    OtpPending {
        account_id: String,
        verify: VerifyOutcome,
    },
}

fn field_error(outcome: &FormOutcome, field: FieldError) -> String {
    match outcome {
        FormOutcome::Invalid(err) if *err == field => {
            format!(r#"<p class="shad-form-message">{err}</p>"#)
        }
        _ => String::new(),
    }
}

/// The form, plus the not-found dialog or the OTP modal when the outcome calls for it.
#[must_use]
pub fn render(mode: FormMode, values: &FormValues, outcome: &FormOutcome) -> String {
    let title = mode.title();
    let action = mode.path();
    let mut form = String::new();

    let _ = write!(
        form,
        r#"<form method="post" action="{action}" class="auth-form" novalidate>
<h1 class="form-title">{title}</h1>
"#
    );

    if mode == FormMode::SignUp {
        let _ = write!(
            form,
            r#"<div class="shad-form-item">
<label for="fullname" class="shad-form-label">Full Name</label>
<input id="fullname" name="fullname" type="text" class="shad-input" placeholder="Enter your full name" value="{}" minlength="2" maxlength="50" required>
{}</div>
"#,
            escape(&values.full_name),
            field_error(outcome, FieldError::FullName)
        );
    }

    let _ = write!(
        form,
        r#"<div class="shad-form-item">
<label for="email" class="shad-form-label">Email</label>
<input id="email" name="email" type="email" class="shad-input" placeholder="Enter your email" value="{}" required>
{}</div>
<button type="submit" class="form-submit-button">{title}</button>
"#,
        escape(&values.email),
        field_error(outcome, FieldError::Email)
    );

    if *outcome == FormOutcome::Failed {
        let _ = write!(
            form,
            r#"<p class="error-message" role="alert">*{FAILED_MESSAGE}</p>
"#
        );
    }

    let other = mode.other();
    let _ = write!(
        form,
        r#"<div class="body-2 flex justify-center">
<p class="text-light-100">{}</p>
<a href="{}" class="ml-1 font-medium text-brand">{}</a>
</div>
</form>"#,
        mode.switch_prompt(),
        other.path(),
        other.title()
    );

    match outcome {
        FormOutcome::NotFound => {
            let _ = write!(
                form,
                r#"
<div class="shad-alert-dialog" role="alertdialog" aria-modal="true" aria-labelledby="not-found-title">
<h2 id="not-found-title" class="h2">Not Found</h2>
<p class="subtitle-2">{NOT_FOUND_MESSAGE}</p>
<a href="{SIGN_IN_PATH}" class="shad-submit-btn">Cancel</a>
</div>"#
            );
        }
        FormOutcome::OtpPending { account_id, verify } => {
            form.push('\n');
            form.push_str(&otp_modal::render(mode, account_id, &values.email, *verify));
        }
        FormOutcome::Idle | FormOutcome::Invalid(_) | FormOutcome::Failed => {}
    }

    form
}

/// Full page: the form inside the auth layout.
#[must_use]
pub fn render_page(mode: FormMode, values: &FormValues, outcome: &FormOutcome) -> String {
    auth_layout(mode.title(), &render(mode, values, outcome))
}

fn respond(status: StatusCode, mode: FormMode, values: &FormValues, outcome: &FormOutcome) -> Response {
    (status, Html(render_page(mode, values, outcome))).into_response()
}

pub async fn sign_in_page() -> Html<String> {
    Html(render_page(
        FormMode::SignIn,
        &FormValues::default(),
        &FormOutcome::Idle,
    ))
}

pub async fn sign_up_page() -> Html<String> {
    Html(render_page(
        FormMode::SignUp,
        &FormValues::default(),
        &FormOutcome::Idle,
    ))
}

/// `POST /sign-in`
pub async fn submit_sign_in(
    auth_state: Extension<Arc<AuthState>>,
    Form(values): Form<FormValues>,
) -> Response {
    let mode = FormMode::SignIn;
    let email = match Email::parse(&values.email) {
        Ok(email) => email,
        Err(err) => {
            return respond(StatusCode::BAD_REQUEST, mode, &values, &FormOutcome::Invalid(err));
        }
    };

    match auth_state.sign_in(&email).await {
        Ok(SignInOutcome::Found(account_id)) => {
            let values = FormValues {
                full_name: String::new(),
                email: email.as_str().to_string(),
            };
            let outcome = FormOutcome::OtpPending {
                account_id: account_id.to_string(),
                verify: VerifyOutcome::Pending,
            };
            respond(StatusCode::OK, mode, &values, &outcome)
        }
        Ok(SignInOutcome::NotFound) => respond(StatusCode::OK, mode, &values, &FormOutcome::NotFound),
        Err(err) => {
            error!("Sign-in failed: {err}");
            respond(err.status_code(), mode, &values, &FormOutcome::Failed)
        }
    }
}

/// `POST /sign-up`
pub async fn submit_sign_up(
    auth_state: Extension<Arc<AuthState>>,
    Form(values): Form<FormValues>,
) -> Response {
    let mode = FormMode::SignUp;
    let account = match FullName::parse(&values.full_name).and_then(|full_name| {
        Ok(NewAccount {
            full_name,
            email: Email::parse(&values.email)?,
        })
    }) {
        Ok(account) => account,
        Err(err) => {
            return respond(StatusCode::BAD_REQUEST, mode, &values, &FormOutcome::Invalid(err));
        }
    };

    match auth_state.create_account(&account).await {
        Ok(account_id) => {
            let values = FormValues {
                full_name: account.full_name.as_str().to_string(),
                email: account.email.as_str().to_string(),
            };
            let outcome = FormOutcome::OtpPending {
                account_id: account_id.to_string(),
                verify: VerifyOutcome::Pending,
            };
            respond(StatusCode::OK, mode, &values, &outcome)
        }
        Err(err) => {
            error!("Sign-up failed: {err}");
            respond(err.status_code(), mode, &values, &FormOutcome::Failed)
        }
    }
}
