//! In-memory model of a single to-do entry.
//!
//! The page object keeps an ordered mirror of these items and derives every
//! expected value (displayed titles, row styling, counter text, persisted
//! records) from it.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Lifecycle status of a to-do item.
///
/// A single tagged enum; the application styles `Completed` rows with the
/// `completed` class and renders `Active` rows unstyled. `Deleted` marks a
/// row that has been removed through the UI (blank edit, clear-completed);
/// the mirror drops such rows rather than keeping them around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoStatus {
    /// Item is pending
    Active,
    /// Item has been checked off
    Completed,
    /// Item has been removed through the UI
    Deleted,
}

impl TodoStatus {
    /// The class the application puts on a row with this status.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Active | Self::Deleted => "",
        }
    }

    /// Whether a row with this status is checked off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// One to-do entry as the driver believes the application holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Generated human-readable title, practically unique within a run
    pub name: String,
    /// Current lifecycle status
    pub status: TodoStatus,
}

impl TodoItem {
    /// Create a fresh item with a generated name and `Active` status.
    ///
    /// The name combines the current wall-clock milliseconds with a small
    /// random perturbation so that items created back-to-back within the
    /// same millisecond still get distinct names. Practical uniqueness, not
    /// a formal guarantee.
    #[must_use]
    pub fn fresh() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let jitter = Uuid::new_v4().as_u128() % 100;
        Self {
            name: format!("Do {}", millis + jitter),
            status: TodoStatus::Active,
        }
    }
}

/// One record of the application's persisted-storage payload.
///
/// The application keeps a single string-keyed storage entry holding a JSON
/// array of these, in display order. The suite only ever reads this format;
/// all mutation flows through simulated UI actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTodo {
    /// Item title as persisted
    pub title: String,
    /// Whether the item is checked off
    pub completed: bool,
}
