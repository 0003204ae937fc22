//! Client side of the account/document provider.
//!
//! Every piece of persistent state (user documents, pending email tokens,
//! sessions) lives in the provider. [`AccountBackend`] is the seam: the server
//! talks to Appwrite through [`AppwriteClient`], tests use [`MemoryBackend`].

pub mod appwrite;
pub mod error;
pub mod memory;

pub use appwrite::{AppwriteClient, AppwriteConfig};
pub use error::RemoteError;
pub use memory::MemoryBackend;

use async_trait::async_trait;
use secrecy::SecretString;

/// User document as stored in the users collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    /// Provider document id.
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    /// Provider account id the document is bound to.
    pub account_id: String,
}

/// Attributes of a user document about to be created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    pub account_id: String,
}

/// Result of asking the provider to email a one-time code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailToken {
    /// Account id the code was issued for. Empty means the provider gave none.
    pub user_id: String,
}

/// Session created by exchanging an account id and code.
#[derive(Clone, Debug)]
pub struct RemoteSession {
    pub id: String,
    pub secret: SecretString,
}

/// Account resolved from a session secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteAccount {
    pub id: String,
}

#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RemoteError>;

    async fn find_user_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<UserRecord>, RemoteError>;

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, RemoteError>;

    /// Issue (or re-issue) an emailed one-time code for `email`.
    async fn create_email_token(&self, email: &str) -> Result<EmailToken, RemoteError>;

    /// Exchange an account id and the emailed code for a session.
    async fn create_session(
        &self,
        account_id: &str,
        secret: &str,
    ) -> Result<RemoteSession, RemoteError>;

    async fn get_account(&self, session: &SecretString) -> Result<RemoteAccount, RemoteError>;

    async fn delete_current_session(&self, session: &SecretString) -> Result<(), RemoteError>;
}
