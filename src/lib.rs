//! # Stashbox (authentication front door)
//!
//! `stashbox` serves the sign-up / sign-in surface of the stashbox file
//! manager. Accounts, user documents and sessions all live in an
//! Appwrite-compatible provider; this crate only translates form submissions
//! into provider calls and keeps the provider session secret in a cookie.
//!
//! ## Flow
//!
//! 1. The auth form submits an email (plus a full name on sign-up).
//! 2. The provider emails a six character one-time code and returns the account id.
//! 3. The OTP modal exchanges account id + code for a provider session.
//! 4. The session secret is stored in the `appwrite-session` cookie
//!    (`Path=/; Secure; HttpOnly; SameSite=Strict`) and the browser lands on `/`.
//!
//! Signing out deletes the provider session, clears the cookie, and always
//! redirects to `/sign-in`.

pub mod api;
pub mod cli;
pub mod remote;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
