//! Configuration for a page-object session.

use crate::wait::WaitOptions;

/// Default URL of the tested application
pub const DEFAULT_APP_URL: &str = "https://demo.playwright.dev/todomvc";

/// Storage key the tested application persists under
pub const DEFAULT_STORAGE_KEY: &str = "react-todos";

/// Configuration for a [`crate::TodoApp`] session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL the page object navigates to on `visit()`
    pub base_url: String,
    /// Storage key the persistence verifications read
    pub storage_key: String,
    /// Polling window for the storage verifications
    pub wait: WaitOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_APP_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            wait: WaitOptions::default(),
        }
    }
}

impl AppConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config honoring the `TODO_APP_URL` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("TODO_APP_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Set the application URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the storage key
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the polling window for storage verifications
    #[must_use]
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }
}
