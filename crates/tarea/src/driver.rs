//! Abstract browser-automation capability.
//!
//! The page object drives the tested application exclusively through this
//! trait: navigation, trusted input events, and read-backs of rendered
//! state. Implementations own retry-until-actionable semantics for
//! interactions; reads report the settled state of the page. The page
//! object adds no polling of its own on top of this, except for the two
//! storage verifications that poll [`evaluate`](TodoDriver::evaluate)
//! through [`crate::wait::wait_until`].
//!
//! Two implementations ship with the crate:
//!
//! - [`crate::sim::SimDriver`]: deterministic in-process double of the
//!   tested application, used by the default test suite.
//! - `CdpDriver` (feature `browser`): real Chromium via the DevTools
//!   protocol.

use async_trait::async_trait;

use crate::result::TodoResult;
use crate::selector::Selector;

/// Keyboard keys the page object dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Commit key
    Enter,
    /// Cancel key
    Escape,
}

impl Key {
    /// DOM `KeyboardEvent.key` value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Escape => "Escape",
        }
    }
}

/// Operations the automation engine exposes to the page object.
///
/// Interaction methods fail with [`crate::TodoError::ElementNotFound`] or
/// [`crate::TodoError::Timeout`] when the target cannot be located or acted
/// on within the engine's window; the page object never recovers from
/// these, they fail the enclosing scenario.
#[async_trait]
pub trait TodoDriver: Send + Sync {
    /// Navigate the bound page to `url`.
    async fn goto(&mut self, url: &str) -> TodoResult<()>;

    /// Reload the current page.
    async fn reload(&mut self) -> TodoResult<()>;

    /// Go back one entry in the page's history.
    async fn go_back(&mut self) -> TodoResult<()>;

    /// Click the first match of `target`.
    async fn click(&mut self, target: &Selector) -> TodoResult<()>;

    /// Double-click the first match of `target`.
    async fn double_click(&mut self, target: &Selector) -> TodoResult<()>;

    /// Replace the value of the form field matching `target`.
    async fn fill(&mut self, target: &Selector, text: &str) -> TodoResult<()>;

    /// Dispatch a key press to the element matching `target`.
    async fn press(&mut self, target: &Selector, key: Key) -> TodoResult<()>;

    /// Remove focus from the element matching `target`.
    async fn blur(&mut self, target: &Selector) -> TodoResult<()>;

    /// Check or uncheck the checkbox matching `target`. Idempotent: setting
    /// an already-checked box to checked is a no-op.
    async fn set_checked(&mut self, target: &Selector, checked: bool) -> TodoResult<()>;

    /// Whether the checkbox matching `target` is currently checked.
    async fn is_checked(&self, target: &Selector) -> TodoResult<bool>;

    /// Whether `target` matches at least one visible element.
    async fn is_visible(&self, target: &Selector) -> TodoResult<bool>;

    /// Current value of the form field matching `target`.
    async fn input_value(&self, target: &Selector) -> TodoResult<String>;

    /// Trimmed text content of every match of `target`, in document order.
    async fn texts(&self, target: &Selector) -> TodoResult<Vec<String>>;

    /// `class` attribute of every match of `target`, in document order.
    async fn class_names(&self, target: &Selector) -> TodoResult<Vec<String>>;

    /// Evaluate a script in the page and return its JSON value.
    async fn evaluate(&self, script: &str) -> TodoResult<serde_json::Value>;
}
