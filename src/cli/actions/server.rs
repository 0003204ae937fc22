use crate::{
    api::{
        self,
        handlers::auth::{AuthConfig, AuthState},
    },
    cli::telemetry,
    remote::{AppwriteClient, AppwriteConfig},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{sync::Arc, time::Duration};
use tracing::debug;

pub struct Args {
    pub port: u16,
    pub appwrite_endpoint: String,
    pub appwrite_project: String,
    pub appwrite_key: SecretString,
    pub appwrite_timeout_seconds: u64,
    pub database_id: String,
    pub users_collection_id: String,
    pub frontend_base_url: String,
    pub default_avatar_url: String,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("appwrite_endpoint", &self.appwrite_endpoint)
            .field("appwrite_project", &self.appwrite_project)
            .field("appwrite_key", &"***")
            .field("appwrite_timeout_seconds", &self.appwrite_timeout_seconds)
            .field("database_id", &self.database_id)
            .field("users_collection_id", &self.users_collection_id)
            .field("frontend_base_url", &self.frontend_base_url)
            .field("default_avatar_url", &self.default_avatar_url)
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the provider client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let appwrite = AppwriteClient::new(AppwriteConfig {
        endpoint: args.appwrite_endpoint,
        project_id: args.appwrite_project,
        api_key: args.appwrite_key,
        database_id: args.database_id,
        users_collection_id: args.users_collection_id,
        timeout: Duration::from_secs(args.appwrite_timeout_seconds),
    })
    .context("Failed to build Appwrite client")?;

    let auth_config = AuthConfig::new(args.frontend_base_url)
        .with_default_avatar_url(args.default_avatar_url);
    let auth_state = Arc::new(AuthState::new(auth_config, Arc::new(appwrite)));

    let result = api::new(args.port, auth_state).await;

    telemetry::shutdown_tracer();

    result
}
