use crate::api::handlers::auth::DEFAULT_AVATAR_URL;
use clap::{Arg, ArgMatches, Command};

pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";
pub const ARG_DEFAULT_AVATAR_URL: &str = "default-avatar-url";

#[derive(Debug)]
pub struct Options {
    pub frontend_base_url: String,
    pub default_avatar_url: String,
}

impl Options {
    /// # Errors
    /// Returns an error if an argument is present but empty.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read = |id: &str| -> anyhow::Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };

        Ok(Self {
            frontend_base_url: read(ARG_FRONTEND_BASE_URL)?,
            default_avatar_url: read(ARG_DEFAULT_AVATAR_URL)?,
        })
    }
}

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FRONTEND_BASE_URL)
                .long(ARG_FRONTEND_BASE_URL)
                .help("Origin allowed to call the JSON API with credentials")
                .env("STASHBOX_FRONTEND_BASE_URL")
                .default_value("http://localhost:8080"),
        )
        .arg(
            Arg::new(ARG_DEFAULT_AVATAR_URL)
                .long(ARG_DEFAULT_AVATAR_URL)
                .help("Avatar stored on newly created user documents")
                .env("STASHBOX_DEFAULT_AVATAR_URL")
                .default_value(DEFAULT_AVATAR_URL),
        )
}
