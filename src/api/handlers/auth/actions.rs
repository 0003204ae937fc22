//! The auth operations behind both the JSON API and the HTML forms.
//!
//! Handlers parse input into the validated types in [`super::fields`] and then
//! call exactly one of these methods. All provider state is reached through
//! [`AccountBackend`](crate::remote::AccountBackend).

use super::{
    error::AuthError,
    fields::{AccountId, Email, FullName, OtpCode},
    state::AuthState,
};
use crate::remote::{NewUser, UserRecord};
use secrecy::SecretString;
use tracing::{error, info, instrument, warn};

/// Result of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// A code was emailed; the account id feeds the OTP modal.
    Found(AccountId),
    /// No user document for that email. No code was sent.
    NotFound,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub full_name: FullName,
    pub email: Email,
}

#[derive(Debug, Clone)]
pub struct VerifiedSession {
    pub session_id: String,
    pub secret: SecretString,
}

impl AuthState {
    /// Ask the provider to email a fresh code and return the account id it belongs to.
    ///
    /// # Errors
    /// [`AuthError::OtpDelivery`] when the provider refuses, and
    /// [`AuthError::MissingAccountId`] when it answers without a usable id.
    #[instrument(skip(self, email))]
    pub async fn send_email_otp(&self, email: &Email) -> Result<AccountId, AuthError> {
        let token = self
            .backend()
            .create_email_token(email.as_str())
            .await
            .map_err(|err| {
                error!("Failed to send email OTP: {err}");
                AuthError::OtpDelivery(err)
            })?;

        if token.user_id.is_empty() {
            error!("Provider issued an email token without an account id");
            return Err(AuthError::MissingAccountId);
        }

        AccountId::parse(&token.user_id).map_err(|_| {
            error!("Provider issued a malformed account id");
            AuthError::MissingAccountId
        })
    }

    /// Send a code to the email and make sure a user document exists for it.
    ///
    /// An existing document is left untouched, so signing up twice with the
    /// same email never duplicates the user.
    ///
    /// # Errors
    /// Propagates lookup, delivery and document creation failures.
    #[instrument(skip(self, account))]
    pub async fn create_account(&self, account: &NewAccount) -> Result<AccountId, AuthError> {
        let existing = self
            .backend()
            .find_user_by_email(account.email.as_str())
            .await?;

        let account_id = self.send_email_otp(&account.email).await?;

        if existing.is_none() {
            let user = NewUser {
                full_name: account.full_name.as_str().to_string(),
                email: account.email.as_str().to_string(),
                avatar: self.config().default_avatar_url().to_string(),
                account_id: account_id.as_str().to_string(),
            };
            let record = self.backend().create_user(&user).await.map_err(|err| {
                error!("Failed to create user document: {err}");
                AuthError::Remote(err)
            })?;
            info!("Created user document {} for account {}", record.id, account_id);
        }

        Ok(account_id)
    }

    /// # Errors
    /// Propagates lookup and delivery failures. An unknown email is not an error.
    #[instrument(skip(self, email))]
    pub async fn sign_in(&self, email: &Email) -> Result<SignInOutcome, AuthError> {
        let existing = self.backend().find_user_by_email(email.as_str()).await?;
        if existing.is_none() {
            info!("Sign-in requested for an unknown email");
            return Ok(SignInOutcome::NotFound);
        }

        let account_id = self.send_email_otp(email).await?;
        Ok(SignInOutcome::Found(account_id))
    }

    /// Exchange account id and code for a provider session.
    ///
    /// # Errors
    /// [`AuthError::InvalidCode`] when the provider rejects the pair.
    #[instrument(skip(self, code))]
    pub async fn verify_secret(
        &self,
        account_id: &AccountId,
        code: &OtpCode,
    ) -> Result<VerifiedSession, AuthError> {
        let session = self
            .backend()
            .create_session(account_id.as_str(), code.as_str())
            .await
            .map_err(|err| {
                warn!("Failed to verify otp: {err}");
                if err.is_unauthorized() {
                    AuthError::InvalidCode(err)
                } else {
                    AuthError::Remote(err)
                }
            })?;

        info!("Session {} created", session.id);

        Ok(VerifiedSession {
            session_id: session.id,
            secret: session.secret,
        })
    }

    /// Resolve the session secret into the user document, if any.
    ///
    /// `Ok(None)` covers both a missing session and an account that has no
    /// user document.
    ///
    /// # Errors
    /// [`AuthError::SessionRejected`] when the provider no longer accepts the
    /// session, [`AuthError::Remote`] for anything else.
    #[instrument(skip(self, session))]
    pub async fn current_user(
        &self,
        session: Option<&SecretString>,
    ) -> Result<Option<UserRecord>, AuthError> {
        let Some(session) = session else {
            return Ok(None);
        };

        let account = self.backend().get_account(session).await.map_err(|err| {
            if err.is_unauthorized() {
                AuthError::SessionRejected(err)
            } else {
                error!("Failed to resolve account: {err}");
                AuthError::Remote(err)
            }
        })?;

        Ok(self.backend().find_user_by_account_id(&account.id).await?)
    }

    /// Delete the provider session behind `session`.
    ///
    /// # Errors
    /// Returns the provider failure; callers still clear the cookie.
    #[instrument(skip(self, session))]
    pub async fn sign_out(&self, session: Option<&SecretString>) -> Result<(), AuthError> {
        let Some(session) = session else {
            return Ok(());
        };

        self.backend()
            .delete_current_session(session)
            .await
            .map_err(|err| {
                error!("Failed to delete session: {err}");
                AuthError::Remote(err)
            })
    }
}
