//! Selector abstraction for element addressing.
//!
//! The page object describes every control it touches as a [`Selector`]
//! value; driver implementations decide how to resolve one. The CDP-backed
//! driver turns selectors into JavaScript query expressions via
//! [`Selector::to_query_all`], while the in-process simulation resolves them
//! structurally against its own widget tree.

use std::fmt;

/// How to locate one or more elements on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g. `"li label"`)
    Css(String),
    /// Exact trimmed text content
    Text(String),
    /// `data-testid` attribute value
    TestId(String),
    /// Input placeholder text
    Placeholder(String),
    /// Accessible label (`aria-label`)
    Label(String),
    /// ARIA role plus accessible name
    Role {
        /// Role name (e.g. `"link"`, `"button"`, `"textbox"`, `"checkbox"`)
        role: String,
        /// Accessible name to match
        name: String,
    },
    /// The n-th match of the base selector (0-based)
    Nth(Box<Selector>, usize),
    /// Matches of `child` that are descendants of a `base` match
    Within(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an exact-text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a test ID selector (`data-testid` attribute)
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Create a placeholder selector
    #[must_use]
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::Placeholder(text.into())
    }

    /// Create an accessible-label selector
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Create a role selector with an accessible name
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Narrow to the n-th match (0-based)
    #[must_use]
    pub fn nth(self, index: usize) -> Self {
        Self::Nth(Box::new(self), index)
    }

    /// Narrow to matches of `child` inside this selector's matches
    #[must_use]
    pub fn find(self, child: Self) -> Self {
        Self::Within(Box::new(self), Box::new(child))
    }

    /// JavaScript expression evaluating to an array of all matches, in
    /// document order.
    #[must_use]
    pub fn to_query_all(&self) -> String {
        match self {
            Self::Css(css) => format!("Array.from(document.querySelectorAll({css:?}))"),
            Self::Text(text) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.trim() === {text:?})"
            ),
            Self::TestId(id) => {
                format!("Array.from(document.querySelectorAll('[data-testid={id:?}]'))")
            }
            Self::Placeholder(text) => {
                format!("Array.from(document.querySelectorAll('[placeholder={text:?}]'))")
            }
            Self::Label(text) => {
                format!("Array.from(document.querySelectorAll('[aria-label={text:?}]'))")
            }
            Self::Role { role, name } => {
                let css = role_css(role);
                format!(
                    "Array.from(document.querySelectorAll({css:?})).filter(el => ((el.getAttribute('aria-label') || el.textContent || '').trim() === {name:?}))"
                )
            }
            Self::Nth(base, index) => format!("({}).slice({index}, {index} + 1)", base.to_query_all()),
            Self::Within(base, child) => format!(
                "(roots => ({}).filter(el => roots.some(r => r !== el && r.contains(el))))({})",
                child.to_query_all(),
                base.to_query_all()
            ),
        }
    }

    /// JavaScript expression evaluating to the first match or `null`.
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("(({})[0] ?? null)", self.to_query_all())
    }

    /// JavaScript expression evaluating to the number of matches.
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("({}).length", self.to_query_all())
    }
}

/// CSS candidates for an ARIA role on the tested application's markup.
fn role_css(role: &str) -> &'static str {
    match role {
        "link" => "a[href]",
        "button" => "button",
        "checkbox" => "input[type=\"checkbox\"]",
        "textbox" => "input:not([type=\"checkbox\"]), textarea",
        _ => "[role]",
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "css={css}"),
            Self::Text(text) => write!(f, "text={text:?}"),
            Self::TestId(id) => write!(f, "test-id={id}"),
            Self::Placeholder(text) => write!(f, "placeholder={text:?}"),
            Self::Label(text) => write!(f, "label={text:?}"),
            Self::Role { role, name } => write!(f, "role={role}[name={name:?}]"),
            Self::Nth(base, index) => write!(f, "{base} >> nth={index}"),
            Self::Within(base, child) => write!(f, "{base} >> {child}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod query_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let query = Selector::css("button.primary").to_query_all();
            assert!(query.contains("querySelectorAll"));
            assert!(query.contains("button.primary"));
        }

        #[test]
        fn test_test_id_query() {
            let query = Selector::test_id("todo-item").to_query_all();
            assert!(query.contains("data-testid"));
            assert!(query.contains("todo-item"));
        }

        #[test]
        fn test_placeholder_query() {
            let query = Selector::placeholder("What needs to be done?").to_query_all();
            assert!(query.contains("placeholder"));
            assert!(query.contains("What needs to be done?"));
        }

        #[test]
        fn test_label_query() {
            let query = Selector::label("Mark all as complete").to_query_all();
            assert!(query.contains("aria-label"));
        }

        #[test]
        fn test_role_query_filters_by_name() {
            let query = Selector::role("link", "Active").to_query_all();
            assert!(query.contains("a[href]"));
            assert!(query.contains("Active"));
        }

        #[test]
        fn test_text_query() {
            let query = Selector::text("2 items left").to_query_all();
            assert!(query.contains("textContent"));
            assert!(query.contains("2 items left"));
        }

        #[test]
        fn test_nth_query_slices() {
            let query = Selector::test_id("todo-item").nth(2).to_query_all();
            assert!(query.contains(".slice(2, 2 + 1)"));
        }

        #[test]
        fn test_within_query_scopes_to_roots() {
            let query = Selector::test_id("todo-item")
                .nth(0)
                .find(Selector::role("textbox", "Edit"))
                .to_query_all();
            assert!(query.contains("contains(el)"));
            assert!(query.contains("data-testid"));
        }

        #[test]
        fn test_first_match_query() {
            let query = Selector::css("li").to_query();
            assert!(query.contains("[0]"));
            assert!(query.contains("?? null"));
        }

        #[test]
        fn test_count_query() {
            let query = Selector::css("li").to_count_query();
            assert!(query.ends_with(".length"));
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_simple() {
            assert_eq!(Selector::test_id("todo-count").to_string(), "test-id=todo-count");
        }

        #[test]
        fn test_display_composed() {
            let selector = Selector::test_id("todo-item")
                .nth(1)
                .find(Selector::role("checkbox", "Toggle Todo"));
            let rendered = selector.to_string();
            assert!(rendered.contains("test-id=todo-item"));
            assert!(rendered.contains("nth=1"));
            assert!(rendered.contains("role=checkbox"));
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_role_constructor() {
            let selector = Selector::role("button", "Clear completed");
            assert!(matches!(selector, Selector::Role { .. }));
        }

        #[test]
        fn test_nth_wraps_base() {
            let selector = Selector::test_id("todo-item").nth(3);
            match selector {
                Selector::Nth(base, 3) => {
                    assert_eq!(*base, Selector::TestId("todo-item".to_string()));
                }
                other => panic!("unexpected selector: {other:?}"),
            }
        }
    }
}
