//! Server-rendered pages: auth form, OTP modal and the signed-in shell.
//!
//! Every page reads [`AuthState`](crate::api::handlers::auth::AuthState) from
//! the request extensions, the same way the JSON handlers do.

use axum::{
    routing::{get, post},
    Router,
};

pub mod auth_form;
pub mod html;
pub mod layout;
pub mod otp_modal;
pub mod pages;
pub mod sidebar;

use crate::api::handlers::auth::session;

pub const HOME_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/sign-in";
pub const SIGN_UP_PATH: &str = "/sign-up";
pub const SIGN_OUT_PATH: &str = "/sign-out";
pub const OTP_VERIFY_PATH: &str = "/otp/verify";
pub const OTP_RESEND_PATH: &str = "/otp/resend";

/// HTML routes. They are merged next to the documented JSON API and are not
/// part of the `OpenAPI` document.
pub fn router() -> Router {
    let mut router = Router::new()
        .route(
            SIGN_IN_PATH,
            get(auth_form::sign_in_page).post(auth_form::submit_sign_in),
        )
        .route(
            SIGN_UP_PATH,
            get(auth_form::sign_up_page).post(auth_form::submit_sign_up),
        )
        .route(OTP_VERIFY_PATH, post(otp_modal::verify))
        .route(OTP_RESEND_PATH, post(otp_modal::resend))
        .route(SIGN_OUT_PATH, post(session::sign_out));

    for item in &sidebar::NAV_ITEMS {
        router = router.route(item.url, get(pages::shell));
    }

    router
}
