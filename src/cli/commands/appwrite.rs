//! Provider connection arguments.

use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_APPWRITE_ENDPOINT: &str = "appwrite-endpoint";
pub const ARG_APPWRITE_PROJECT: &str = "appwrite-project";
pub const ARG_APPWRITE_KEY: &str = "appwrite-key";
pub const ARG_APPWRITE_TIMEOUT_SECONDS: &str = "appwrite-timeout-seconds";
pub const ARG_DATABASE_ID: &str = "database-id";
pub const ARG_USERS_COLLECTION_ID: &str = "users-collection-id";

pub struct Options {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: SecretString,
    pub timeout_seconds: u64,
    pub database_id: String,
    pub users_collection_id: String,
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("database_id", &self.database_id)
            .field("users_collection_id", &self.users_collection_id)
            .finish()
    }
}

impl Options {
    /// Parse provider arguments from matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing or empty.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        // clap passes "" through when an env var is set but empty
        let read_required = |id: &str| -> anyhow::Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };

        Ok(Self {
            endpoint: read_required(ARG_APPWRITE_ENDPOINT)?,
            project_id: read_required(ARG_APPWRITE_PROJECT)?,
            api_key: SecretString::from(read_required(ARG_APPWRITE_KEY)?),
            timeout_seconds: matches
                .get_one::<u64>(ARG_APPWRITE_TIMEOUT_SECONDS)
                .copied()
                .unwrap_or(10),
            database_id: read_required(ARG_DATABASE_ID)?,
            users_collection_id: read_required(ARG_USERS_COLLECTION_ID)?,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_APPWRITE_ENDPOINT)
                .long(ARG_APPWRITE_ENDPOINT)
                .help("Appwrite API base URL, e.g. https://cloud.appwrite.io/v1")
                .env("STASHBOX_APPWRITE_ENDPOINT")
                .required(true),
        )
        .arg(
            Arg::new(ARG_APPWRITE_PROJECT)
                .long(ARG_APPWRITE_PROJECT)
                .help("Appwrite project id")
                .env("STASHBOX_APPWRITE_PROJECT")
                .required(true),
        )
        .arg(
            Arg::new(ARG_APPWRITE_KEY)
                .long(ARG_APPWRITE_KEY)
                .help("Appwrite API key with users and documents scopes")
                .env("STASHBOX_APPWRITE_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_APPWRITE_TIMEOUT_SECONDS)
                .long(ARG_APPWRITE_TIMEOUT_SECONDS)
                .help("Timeout for each Appwrite request in seconds")
                .env("STASHBOX_APPWRITE_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_DATABASE_ID)
                .long(ARG_DATABASE_ID)
                .help("Database holding the users collection")
                .env("STASHBOX_DATABASE_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_USERS_COLLECTION_ID)
                .long(ARG_USERS_COLLECTION_ID)
                .help("Collection storing one document per user")
                .env("STASHBOX_USERS_COLLECTION_ID")
                .required(true),
        )
}
