//! Auth handlers and supporting modules.
//!
//! Sign-up and sign-in both end in an emailed one-time code. The code is
//! exchanged for a provider session whose secret is kept in the
//! `appwrite-session` cookie:
//!
//! - `POST /v1/auth/sign-up`, `POST /v1/auth/sign-in` and `POST /v1/auth/otp`
//!   return the account id the code was issued for.
//! - `POST /v1/auth/verify` sets the cookie.
//! - `GET /v1/auth/me` resolves the cookie into the user document.
//! - `POST /v1/auth/sign-out` deletes the provider session and always clears
//!   the cookie.
//!
//! The HTML pages in [`crate::web`] call the same [`AuthState`] operations.

pub(crate) mod account;
mod actions;
mod error;
pub mod fields;
pub(crate) mod otp;
pub(crate) mod session;
mod state;
pub(crate) mod types;

pub use actions::{NewAccount, SignInOutcome, VerifiedSession};
pub use error::AuthError;
pub use session::SESSION_COOKIE_NAME;
pub use state::{AuthConfig, AuthState, DEFAULT_AVATAR_URL};
