//! Auth state and configuration.

use crate::remote::AccountBackend;
use std::sync::Arc;

pub const DEFAULT_AVATAR_URL: &str = "https://www.gravatar.com/avatar/?d=mp&s=256";
const DEFAULT_FRONTEND_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_base_url: String,
    default_avatar_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRONTEND_BASE_URL.to_string())
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_default_avatar_url(mut self, url: String) -> Self {
        self.default_avatar_url = url;
        self
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    /// Placeholder avatar stored on newly created user documents.
    #[must_use]
    pub fn default_avatar_url(&self) -> &str {
        &self.default_avatar_url
    }
}

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AuthState {
    config: AuthConfig,
    backend: Arc<dyn AccountBackend>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, backend: Arc<dyn AccountBackend>) -> Self {
        Self { config, backend }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(crate) fn backend(&self) -> &dyn AccountBackend {
        self.backend.as_ref()
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
