//! In-process stand-in for the provider.
//!
//! Mirrors the provider semantics the auth flow relies on: one account id per
//! email that survives re-issued codes, single-use codes, a unique index on the
//! user email. Failure switches let tests exercise the error paths.

use super::{
    AccountBackend, EmailToken, NewUser, RemoteAccount, RemoteError, RemoteSession, UserRecord,
};
use async_trait::async_trait;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};
use tracing::info;
use ulid::Ulid;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
    fail_email_tokens: AtomicBool,
    blank_email_tokens: AtomicBool,
    fail_session_deletes: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserRecord>,
    // email -> account id
    accounts: HashMap<String, String>,
    // account id -> pending code
    pending: HashMap<String, String>,
    // session secret -> (session id, account id)
    sessions: HashMap<String, (String, String)>,
    issued_tokens: usize,
    fixed_code: Option<String>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every issued code will be `code` instead of a random six digit number.
    #[must_use]
    pub fn with_fixed_code(self, code: &str) -> Self {
        self.set_fixed_code(code);
        self
    }

    /// Codes issued from now on will be `code`.
    pub fn set_fixed_code(&self, code: &str) {
        self.lock().fixed_code = Some(code.to_string());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an existing user together with its account.
    pub fn seed_user(&self, full_name: &str, email: &str, avatar: &str) -> UserRecord {
        let mut inner = self.lock();
        let account_id = inner
            .accounts
            .entry(email.to_string())
            .or_insert_with(|| Ulid::new().to_string().to_lowercase())
            .clone();
        let record = UserRecord {
            id: Uuid::new_v4().simple().to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            avatar: avatar.to_string(),
            account_id,
        };
        inner.users.push(record.clone());
        record
    }

    /// The code most recently "emailed" for `account_id`.
    #[must_use]
    pub fn pending_code(&self, account_id: &str) -> Option<String> {
        self.lock().pending.get(account_id).cloned()
    }

    #[must_use]
    pub fn issued_tokens(&self) -> usize {
        self.lock().issued_tokens
    }

    #[must_use]
    pub fn users(&self) -> Vec<UserRecord> {
        self.lock().users.clone()
    }

    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn fail_email_tokens(&self, fail: bool) {
        self.fail_email_tokens.store(fail, Ordering::SeqCst);
    }

    /// Answer email token requests with an empty account id.
    pub fn blank_email_tokens(&self, blank: bool) {
        self.blank_email_tokens.store(blank, Ordering::SeqCst);
    }

    pub fn fail_session_deletes(&self, fail: bool) {
        self.fail_session_deletes.store(fail, Ordering::SeqCst);
    }
}

fn unavailable() -> RemoteError {
    RemoteError::status(
        503,
        "general_service_unavailable",
        "The server is currently unavailable.",
    )
}

#[async_trait]
impl AccountBackend for MemoryBackend {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RemoteError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_user_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<UserRecord>, RemoteError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.account_id == account_id)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, RemoteError> {
        let mut inner = self.lock();
        if inner.users.iter().any(|existing| existing.email == user.email) {
            return Err(RemoteError::status(
                409,
                "document_already_exists",
                "Document with the requested ID already exists.",
            ));
        }

        let record = UserRecord {
            id: Uuid::new_v4().simple().to_string(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            account_id: user.account_id.clone(),
        };
        inner.users.push(record.clone());
        Ok(record)
    }

    async fn create_email_token(&self, email: &str) -> Result<EmailToken, RemoteError> {
        if self.fail_email_tokens.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        if self.blank_email_tokens.load(Ordering::SeqCst) {
            return Ok(EmailToken {
                user_id: String::new(),
            });
        }

        let mut inner = self.lock();
        let account_id = inner
            .accounts
            .entry(email.to_string())
            .or_insert_with(|| Ulid::new().to_string().to_lowercase())
            .clone();
        let code = inner
            .fixed_code
            .clone()
            .unwrap_or_else(|| format!("{:06}", rand::thread_rng().gen_range(0..1_000_000)));

        info!("one-time code issued for account {}", account_id);

        inner.pending.insert(account_id.clone(), code);
        inner.issued_tokens += 1;

        Ok(EmailToken {
            user_id: account_id,
        })
    }

    async fn create_session(
        &self,
        account_id: &str,
        secret: &str,
    ) -> Result<RemoteSession, RemoteError> {
        let mut inner = self.lock();
        if inner.pending.get(account_id).map(String::as_str) != Some(secret) {
            return Err(RemoteError::status(
                401,
                "user_invalid_token",
                "Invalid token passed in the request.",
            ));
        }
        inner.pending.remove(account_id);

        let session_id = Ulid::new().to_string().to_lowercase();
        let session_secret = Uuid::new_v4().simple().to_string();
        inner.sessions.insert(
            session_secret.clone(),
            (session_id.clone(), account_id.to_string()),
        );

        Ok(RemoteSession {
            id: session_id,
            secret: SecretString::from(session_secret),
        })
    }

    async fn get_account(&self, session: &SecretString) -> Result<RemoteAccount, RemoteError> {
        self.lock()
            .sessions
            .get(session.expose_secret())
            .map(|(_, account_id)| RemoteAccount {
                id: account_id.clone(),
            })
            .ok_or_else(|| {
                RemoteError::status(
                    401,
                    "user_unauthorized",
                    "The current user is not authorized to perform the requested action.",
                )
            })
    }

    async fn delete_current_session(&self, session: &SecretString) -> Result<(), RemoteError> {
        if self.fail_session_deletes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        self.lock()
            .sessions
            .remove(session.expose_secret())
            .map(|_| ())
            .ok_or_else(|| {
                RemoteError::status(401, "user_session_not_found", "The session was not found.")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[tokio::test]
    async fn reissued_code_keeps_account_id() -> Result<()> {
        let backend = MemoryBackend::new();
        let first = backend.create_email_token("ann@example.com").await?;
        let second = backend.create_email_token("ann@example.com").await?;

        assert_eq!(first.user_id, second.user_id);
        assert_eq!(backend.issued_tokens(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn code_is_single_use() -> Result<()> {
        let backend = MemoryBackend::new().with_fixed_code("123456");
        let token = backend.create_email_token("ann@example.com").await?;

        let session = backend.create_session(&token.user_id, "123456").await?;
        assert!(!session.secret.expose_secret().is_empty());
        assert!(backend.create_session(&token.user_id, "123456").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn random_codes_are_six_digits() -> Result<()> {
        let backend = MemoryBackend::new();
        let token = backend.create_email_token("ann@example.com").await?;
        let code = backend
            .pending_code(&token.user_id)
            .context("no pending code")?;

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        Ok(())
    }

    #[tokio::test]
    async fn session_resolves_and_deletes() -> Result<()> {
        let backend = MemoryBackend::new().with_fixed_code("654321");
        let token = backend.create_email_token("bob@example.com").await?;
        let session = backend.create_session(&token.user_id, "654321").await?;

        let account = backend.get_account(&session.secret).await?;
        assert_eq!(account.id, token.user_id);

        backend.delete_current_session(&session.secret).await?;
        assert_eq!(backend.active_sessions(), 0);
        let err = backend.get_account(&session.secret).await.err();
        assert!(err.is_some_and(|err| err.is_unauthorized()));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_rejected() -> Result<()> {
        let backend = MemoryBackend::new();
        backend.seed_user("Ann", "ann@example.com", "https://img/a.png");

        let result = backend
            .create_user(&NewUser {
                full_name: "Ann Again".to_string(),
                email: "ann@example.com".to_string(),
                avatar: String::new(),
                account_id: "other".to_string(),
            })
            .await;

        assert!(matches!(result, Err(RemoteError::Status { status: 409, .. })));
        assert_eq!(backend.users().len(), 1);
        Ok(())
    }
}
