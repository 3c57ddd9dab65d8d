//! Result and error types for Tarea.

use thiserror::Error;

/// Result type for Tarea operations
pub type TodoResult<T> = Result<T, TodoError>;

/// Errors that can occur while driving or verifying the application
#[derive(Debug, Error)]
pub enum TodoError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched the selector
    #[error("No element matched selector {selector}")]
    ElementNotFound {
        /// Rendered selector description
        selector: String,
    },

    /// Interaction with a located element failed
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// Script evaluation in the page failed
    #[error("Script evaluation failed: {message}")]
    EvalError {
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// An observed value did not match the mirror-derived expectation
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Expected-vs-actual description
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
