//! The tested application's fixed UI contract.
//!
//! These strings are external facts about the application under test: its
//! input placeholder, accessible labels, test identifiers, filter-link
//! captions. The page object addresses the page through them and the
//! in-process simulation renders the same surface.

/// Placeholder of the new-item text input
pub const NEW_TODO_PLACEHOLDER: &str = "What needs to be done?";

/// Accessible label of the global mark-all control
pub const TOGGLE_ALL_LABEL: &str = "Mark all as complete";

/// Accessible label of each row's completion checkbox
pub const TOGGLE_TODO_LABEL: &str = "Toggle Todo";

/// Accessible name of a row's edit textbox
pub const EDIT_TEXTBOX_NAME: &str = "Edit";

/// Caption of the clear-completed button
pub const CLEAR_COMPLETED_TEXT: &str = "Clear completed";

/// Test identifier of a to-do row
pub const TODO_ITEM_TEST_ID: &str = "todo-item";

/// Test identifier of a row's title element
pub const TODO_TITLE_TEST_ID: &str = "todo-title";

/// Test identifier of the remaining-count label
pub const TODO_COUNT_TEST_ID: &str = "todo-count";

/// Class the application puts on the selected filter link
pub const SELECTED_CLASS: &str = "selected";

/// Filter views the application's routing exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every item
    #[default]
    All,
    /// Items not yet completed
    Active,
    /// Completed items
    Completed,
}

impl Filter {
    /// Caption of this filter's link
    #[must_use]
    pub const fn link_text(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Parse a filter from its link caption
    #[must_use]
    pub fn from_link_text(text: &str) -> Option<Self> {
        match text {
            "All" => Some(Self::All),
            "Active" => Some(Self::Active),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Remaining-count label text for `count` active items.
///
/// Singular wording exactly at one item, plural for every other count
/// including zero.
#[must_use]
pub fn remaining_label(count: usize) -> String {
    if count == 1 {
        format!("{count} item left")
    } else {
        format!("{count} items left")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_link_round_trip() {
        for filter in [Filter::All, Filter::Active, Filter::Completed] {
            assert_eq!(Filter::from_link_text(filter.link_text()), Some(filter));
        }
        assert_eq!(Filter::from_link_text("Archived"), None);
    }

    #[test]
    fn test_remaining_label_singular_only_at_one() {
        assert_eq!(remaining_label(0), "0 items left");
        assert_eq!(remaining_label(1), "1 item left");
        assert_eq!(remaining_label(2), "2 items left");
        assert_eq!(remaining_label(5), "5 items left");
    }
}
