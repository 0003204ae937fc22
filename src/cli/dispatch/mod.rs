//! Command-line argument dispatch.
//!
//! Maps validated CLI arguments to the action the binary executes.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{appwrite, auth};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or empty.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let appwrite_opts = appwrite::Options::parse(matches)?;
    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        appwrite_endpoint: appwrite_opts.endpoint,
        appwrite_project: appwrite_opts.project_id,
        appwrite_key: appwrite_opts.api_key,
        appwrite_timeout_seconds: appwrite_opts.timeout_seconds,
        database_id: appwrite_opts.database_id,
        users_collection_id: appwrite_opts.users_collection_id,
        frontend_base_url: auth_opts.frontend_base_url,
        default_avatar_url: auth_opts.default_avatar_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn empty_env_value_is_rejected() {
        temp_env::with_vars(
            [
                ("STASHBOX_APPWRITE_ENDPOINT", Some("https://aw.stashbox.dev/v1")),
                ("STASHBOX_APPWRITE_PROJECT", Some("stashbox")),
                ("STASHBOX_APPWRITE_KEY", Some(" ")),
                ("STASHBOX_DATABASE_ID", Some("main")),
                ("STASHBOX_USERS_COLLECTION_ID", Some("users")),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["stashbox"]);
                let result = handler(&matches);
                assert!(result.is_err());
                if let Err(err) = result {
                    assert!(err
                        .to_string()
                        .contains("missing required argument: --appwrite-key"));
                }
            },
        );
    }

    #[test]
    fn server_action_from_env() {
        temp_env::with_vars(
            [
                ("STASHBOX_APPWRITE_ENDPOINT", Some("https://aw.stashbox.dev/v1")),
                ("STASHBOX_APPWRITE_PROJECT", Some("stashbox")),
                ("STASHBOX_APPWRITE_KEY", Some("standard_key")),
                ("STASHBOX_DATABASE_ID", Some("main")),
                ("STASHBOX_USERS_COLLECTION_ID", Some("users")),
                ("STASHBOX_PORT", Some("9090")),
                ("STASHBOX_APPWRITE_TIMEOUT_SECONDS", None),
                ("STASHBOX_FRONTEND_BASE_URL", None),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["stashbox"]);
                let action = handler(&matches);
                assert!(action.is_ok());
                if let Ok(Action::Server(args)) = action {
                    assert_eq!(args.port, 9090);
                    assert_eq!(args.appwrite_key.expose_secret(), "standard_key");
                    assert_eq!(args.appwrite_timeout_seconds, 10);
                    assert_eq!(args.frontend_base_url, "http://localhost:8080");
                    assert!(!format!("{args:?}").contains("standard_key"));
                }
            },
        );
    }
}
