//! Appwrite REST client.
//!
//! Admin calls (documents, email tokens, session creation) authenticate with
//! the project API key. Calls made on behalf of a signed-in user carry the
//! session secret from the `appwrite-session` cookie instead.

use super::{
    AccountBackend, EmailToken, NewUser, RemoteAccount, RemoteError, RemoteSession, UserRecord,
};
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const HEADER_PROJECT: &str = "X-Appwrite-Project";
const HEADER_KEY: &str = "X-Appwrite-Key";
const HEADER_SESSION: &str = "X-Appwrite-Session";
const UNIQUE_ID: &str = "unique()";

#[derive(Clone)]
pub struct AppwriteConfig {
    /// API base, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    pub project_id: String,
    pub api_key: SecretString,
    pub database_id: String,
    pub users_collection_id: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for AppwriteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"***")
            .field("database_id", &self.database_id)
            .field("users_collection_id", &self.users_collection_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    config: AppwriteConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    total: u64,
    documents: Vec<UserDocument>,
}

#[derive(Debug, Deserialize)]
struct UserDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    fullname: String,
    email: String,
    #[serde(default)]
    avatar: String,
    #[serde(rename = "accountId")]
    account_id: String,
}

impl From<UserDocument> for UserRecord {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            full_name: doc.fullname,
            email: doc.email,
            avatar: doc.avatar,
            account_id: doc.account_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(rename = "userId", default)]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    secret: String,
}

#[derive(Debug, Deserialize)]
struct AccountBody {
    #[serde(rename = "$id")]
    id: String,
}

/// Validate the configured endpoint and strip any trailing slash.
///
/// # Errors
/// Returns an error if the endpoint is not an absolute http(s) URL with a host.
pub fn endpoint_base(endpoint: &str) -> Result<String, RemoteError> {
    let url = Url::parse(endpoint).map_err(|err| RemoteError::Config(format!("{endpoint}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(RemoteError::Config(format!(
                "unsupported scheme {scheme} in {endpoint}"
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(RemoteError::Config(format!("no host in {endpoint}")));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

impl AppwriteClient {
    /// # Errors
    /// Returns an error if the endpoint is invalid or the HTTP client cannot be built.
    pub fn new(config: AppwriteConfig) -> Result<Self, RemoteError> {
        let endpoint = endpoint_base(&config.endpoint)?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        debug!("appwrite endpoint: {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    fn admin(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.endpoint))
            .header(HEADER_PROJECT, &self.config.project_id)
            .header(HEADER_KEY, self.config.api_key.expose_secret())
    }

    fn on_behalf(&self, method: Method, path: &str, session: &SecretString) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.endpoint))
            .header(HEADER_PROJECT, &self.config.project_id)
            .header(HEADER_SESSION, session.expose_secret())
    }

    fn documents_path(&self) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.config.database_id, self.config.users_collection_id
        )
    }

    async fn find_user_by(
        &self,
        attribute: &str,
        value: &str,
    ) -> Result<Option<UserRecord>, RemoteError> {
        let equal = json!({
            "method": "equal",
            "attribute": attribute,
            "values": [value],
        })
        .to_string();
        let limit = json!({ "method": "limit", "values": [1] }).to_string();

        let list: DocumentList = send_json(
            self.admin(Method::GET, &self.documents_path())
                .query(&[("queries[]", equal), ("queries[]", limit)]),
        )
        .await?;

        if list.total == 0 {
            return Ok(None);
        }

        Ok(list.documents.into_iter().next().map(UserRecord::from))
    }
}

async fn check(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let parsed: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();

    debug!(
        "appwrite rejected request: {} {} {}",
        status, parsed.kind, parsed.message
    );

    Err(RemoteError::Status {
        status: status.as_u16(),
        kind: parsed.kind,
        message: parsed.message,
    })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RemoteError> {
    let response = check(request.send().await?).await?;
    let body = response.bytes().await?;

    serde_json::from_slice(&body).map_err(|err| RemoteError::Decode(err.to_string()))
}

#[async_trait]
impl AccountBackend for AppwriteClient {
    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, RemoteError> {
        self.find_user_by("email", email).await
    }

    #[instrument(skip(self))]
    async fn find_user_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<UserRecord>, RemoteError> {
        self.find_user_by("accountId", account_id).await
    }

    #[instrument(skip(self))]
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, RemoteError> {
        let payload = json!({
            "documentId": UNIQUE_ID,
            "data": {
                "fullname": user.full_name,
                "email": user.email,
                "avatar": user.avatar,
                "accountId": user.account_id,
            },
        });

        let doc: UserDocument =
            send_json(self.admin(Method::POST, &self.documents_path()).json(&payload)).await?;

        Ok(doc.into())
    }

    #[instrument(skip(self))]
    async fn create_email_token(&self, email: &str) -> Result<EmailToken, RemoteError> {
        let payload = json!({ "userId": UNIQUE_ID, "email": email });

        let token: TokenBody =
            send_json(self.admin(Method::POST, "/account/tokens/email").json(&payload)).await?;

        Ok(EmailToken {
            user_id: token.user_id,
        })
    }

    #[instrument(skip(self, secret))]
    async fn create_session(
        &self,
        account_id: &str,
        secret: &str,
    ) -> Result<RemoteSession, RemoteError> {
        let payload = json!({ "userId": account_id, "secret": secret });

        let session: SessionBody =
            send_json(self.admin(Method::POST, "/account/sessions/token").json(&payload)).await?;

        // The secret is only returned to callers holding an API key.
        if session.secret.is_empty() {
            return Err(RemoteError::Decode(
                "session created without a secret, check the API key scopes".to_string(),
            ));
        }

        Ok(RemoteSession {
            id: session.id,
            secret: SecretString::from(session.secret),
        })
    }

    #[instrument(skip(self, session))]
    async fn get_account(&self, session: &SecretString) -> Result<RemoteAccount, RemoteError> {
        let account: AccountBody =
            send_json(self.on_behalf(Method::GET, "/account", session)).await?;

        Ok(RemoteAccount { id: account.id })
    }

    #[instrument(skip(self, session))]
    async fn delete_current_session(&self, session: &SecretString) -> Result<(), RemoteError> {
        check(
            self.on_behalf(Method::DELETE, "/account/sessions/current", session)
                .send()
                .await?,
        )
        .await?;

        Ok(())
    }
}
