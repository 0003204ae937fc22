pub mod appwrite;
pub mod auth;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("stashbox")
        .about("Sign-up, sign-in and OTP sessions for the stashbox file manager")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("STASHBOX_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = appwrite::with_args(command);
    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use appwrite::{
        ARG_APPWRITE_ENDPOINT, ARG_APPWRITE_KEY, ARG_APPWRITE_PROJECT,
        ARG_APPWRITE_TIMEOUT_SECONDS, ARG_DATABASE_ID, ARG_USERS_COLLECTION_ID,
    };

    const REQUIRED_ENV: [&str; 5] = [
        "STASHBOX_APPWRITE_ENDPOINT",
        "STASHBOX_APPWRITE_PROJECT",
        "STASHBOX_APPWRITE_KEY",
        "STASHBOX_DATABASE_ID",
        "STASHBOX_USERS_COLLECTION_ID",
    ];

    fn required_args() -> Vec<String> {
        [
            "stashbox",
            "--appwrite-endpoint",
            "https://cloud.appwrite.io/v1",
            "--appwrite-project",
            "stashbox",
            "--appwrite-key",
            "standard_key",
            "--database-id",
            "main",
            "--users-collection-id",
            "users",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    fn without_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let mut vars: Vec<(&str, Option<&str>)> =
            REQUIRED_ENV.iter().map(|key| (*key, None)).collect();
        vars.push(("STASHBOX_LOG_LEVEL", None));
        vars.push(("STASHBOX_PORT", None));
        vars.push(("STASHBOX_APPWRITE_TIMEOUT_SECONDS", None));
        temp_env::with_vars(vars, f)
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "stashbox");
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_args_and_defaults() -> Result<(), Box<dyn std::error::Error>> {
        without_env(|| {
            let matches = new().try_get_matches_from(required_args())?;

            assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
            assert_eq!(
                matches.get_one::<String>(ARG_APPWRITE_ENDPOINT).cloned(),
                Some("https://cloud.appwrite.io/v1".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_APPWRITE_PROJECT).cloned(),
                Some("stashbox".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_APPWRITE_KEY).cloned(),
                Some("standard_key".to_string())
            );
            assert_eq!(
                matches.get_one::<u64>(ARG_APPWRITE_TIMEOUT_SECONDS).copied(),
                Some(10)
            );
            assert_eq!(
                matches.get_one::<String>(ARG_DATABASE_ID).cloned(),
                Some("main".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(ARG_USERS_COLLECTION_ID).cloned(),
                Some("users".to_string())
            );
            assert_eq!(
                matches.get_one::<String>(auth::ARG_FRONTEND_BASE_URL).cloned(),
                Some("http://localhost:8080".to_string())
            );
            Ok(())
        })
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("STASHBOX_APPWRITE_ENDPOINT", Some("https://aw.stashbox.dev/v1")),
                ("STASHBOX_APPWRITE_PROJECT", Some("stashbox")),
                ("STASHBOX_APPWRITE_KEY", Some("standard_key")),
                ("STASHBOX_APPWRITE_TIMEOUT_SECONDS", Some("3")),
                ("STASHBOX_DATABASE_ID", Some("main")),
                ("STASHBOX_USERS_COLLECTION_ID", Some("users")),
                ("STASHBOX_PORT", Some("443")),
                ("STASHBOX_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["stashbox"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(ARG_APPWRITE_ENDPOINT).cloned(),
                    Some("https://aw.stashbox.dev/v1".to_string())
                );
                assert_eq!(
                    matches.get_one::<u64>(ARG_APPWRITE_TIMEOUT_SECONDS).copied(),
                    Some(3)
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            without_env(|| {
                let mut args = required_args();
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_missing_key_fails() {
        without_env(|| {
            let args: Vec<String> = required_args()
                .into_iter()
                .filter(|arg| arg != "--appwrite-key" && arg != "standard_key")
                .collect();
            let result = new().try_get_matches_from(args);
            assert_eq!(
                result.map_err(|e| e.kind()).err(),
                Some(clap::error::ErrorKind::MissingRequiredArgument)
            );
        });
    }

    #[test]
    fn test_zero_timeout_rejected() {
        without_env(|| {
            let mut args = required_args();
            args.push("--appwrite-timeout-seconds".to_string());
            args.push("0".to_string());
            let result = new().try_get_matches_from(args);
            assert!(result.is_err());
        });
    }
}
