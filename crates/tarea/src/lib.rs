//! Tarea: page-object model and end-to-end scenario suite for the TodoMVC
//! reference application.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     TAREA Architecture                          │
//! ├────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌─────────────────┐      │
//! │   │ Scenario   │    │ TodoApp    │    │ TodoDriver       │      │
//! │   │ (Rust)     │───►│ page object│───►│ SimDriver /      │      │
//! │   │            │    │ + mirror   │    │ CdpDriver (CDP)  │      │
//! │   └────────────┘    └────────────┘    └─────────────────┘      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scenarios instantiate one [`TodoApp`] per test, drive it through a
//! sequence of UI actions, and assert invariants through its verification
//! methods. The page object keeps a mirror list of [`TodoItem`], its
//! belief about application state, and every expectation is derived from
//! that mirror. By default the suite runs against [`sim::SimDriver`], a
//! deterministic in-process double of the application; the `browser`
//! feature adds a Chromium-backed driver with the same trait surface.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod app;
mod config;
mod contract;
mod driver;
mod model;
mod result;
mod selector;

/// Deterministic in-process double of the tested application.
pub mod sim;

/// Bounded polling for eventually-consistent observations.
pub mod wait;

/// Real browser control via the Chrome DevTools Protocol.
#[cfg(feature = "browser")]
pub mod cdp;

pub use app::{CommitMethod, SaveMethod, TodoApp};
pub use config::{AppConfig, DEFAULT_APP_URL, DEFAULT_STORAGE_KEY};
pub use contract::{remaining_label, Filter};
pub use driver::{Key, TodoDriver};
pub use model::{StoredTodo, TodoItem, TodoStatus};
pub use result::{TodoError, TodoResult};
pub use selector::Selector;
