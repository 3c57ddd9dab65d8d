//! Deterministic in-process double of the tested application.
//!
//! [`SimDriver`] implements [`TodoDriver`] over an in-memory model of the
//! to-do application's observable surface: the new-item input, the ordered
//! row list, edit mode, routing filters, and the persisted storage entry.
//! It exists so the scenario suite runs headless and deterministic by
//! default; the `browser` feature swaps in a real Chromium-backed driver
//! with the same trait surface.
//!
//! The behavior implemented here is the application's external contract,
//! not an interpretation of it: Enter on a non-blank input appends a
//! trimmed item, a blank edit commit deletes the row, Escape discards the
//! edit buffer, toggle-all reads checked only when every row is completed,
//! and every mutation rewrites the storage entry.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::contract::{
    Filter, CLEAR_COMPLETED_TEXT, EDIT_TEXTBOX_NAME, NEW_TODO_PLACEHOLDER, SELECTED_CLASS,
    TODO_COUNT_TEST_ID, TODO_ITEM_TEST_ID, TODO_TITLE_TEST_ID, TOGGLE_ALL_LABEL,
    TOGGLE_TODO_LABEL,
};
use crate::config::DEFAULT_STORAGE_KEY;
use crate::driver::{Key, TodoDriver};
use crate::model::StoredTodo;
use crate::result::{TodoError, TodoResult};
use crate::selector::Selector;

/// One rendered row of the simulated application.
#[derive(Debug, Clone)]
struct SimRow {
    title: String,
    completed: bool,
}

/// An in-flight edit session: absolute row index plus the edit field's
/// current content.
#[derive(Debug, Clone)]
struct EditSession {
    index: usize,
    buffer: String,
}

/// Widgets a [`Selector`] can resolve to on the simulated page.
///
/// Row-scoped targets carry the row's ordinal among *rendered* rows (the
/// current filter applied), matching how the automation engine's n-th
/// addressing sees the page.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SimTarget {
    NewTodoInput,
    ToggleAll,
    Items,
    Item(usize),
    Titles,
    Counter,
    ClearCompleted,
    FilterLink(Filter),
    Toggle(usize),
    EditField(usize),
    ItemLabel(usize),
    TextProbe(String),
}

/// Deterministic in-process implementation of [`TodoDriver`].
#[derive(Debug)]
pub struct SimDriver {
    loaded: bool,
    input: String,
    rows: Vec<SimRow>,
    editing: Option<EditSession>,
    filter: Filter,
    history: Vec<Filter>,
    storage: HashMap<String, String>,
    storage_key: String,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a fresh simulated page with empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaded: false,
            input: String::new(),
            rows: Vec::new(),
            editing: None,
            filter: Filter::All,
            history: Vec::new(),
            storage: HashMap::new(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Persist under a different storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    fn ensure_loaded(&self) -> TodoResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(TodoError::NavigationError {
                url: String::new(),
                message: "no page loaded".to_string(),
            })
        }
    }

    /// Absolute indices of rows the current filter renders, in order.
    fn visible_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| match self.filter {
                Filter::All => true,
                Filter::Active => !row.completed,
                Filter::Completed => row.completed,
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Absolute index of the `ordinal`-th rendered row.
    fn abs_index(&self, ordinal: usize) -> TodoResult<usize> {
        self.visible_indices()
            .get(ordinal)
            .copied()
            .ok_or_else(|| TodoError::ElementNotFound {
                selector: format!("test-id={TODO_ITEM_TEST_ID} >> nth={ordinal}"),
            })
    }

    fn row_editing(&self, abs: usize) -> bool {
        self.editing.as_ref().is_some_and(|e| e.index == abs)
    }

    fn active_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.completed).count()
    }

    fn any_completed(&self) -> bool {
        self.rows.iter().any(|row| row.completed)
    }

    fn counter_text(&self) -> String {
        let count = self.active_count();
        let noun = if count == 1 { "item" } else { "items" };
        format!("{count} {noun} left")
    }

    fn row_class(&self, abs: usize) -> String {
        let mut classes = Vec::new();
        if self.rows[abs].completed {
            classes.push("completed");
        }
        if self.row_editing(abs) {
            classes.push("editing");
        }
        classes.join(" ")
    }

    /// Rewrite the storage entry from the current row list.
    fn persist(&mut self) -> TodoResult<()> {
        let records: Vec<StoredTodo> = self
            .rows
            .iter()
            .map(|row| StoredTodo {
                title: row.title.clone(),
                completed: row.completed,
            })
            .collect();
        let payload = serde_json::to_string(&records)?;
        trace!(key = %self.storage_key, rows = records.len(), "persist");
        self.storage.insert(self.storage_key.clone(), payload);
        Ok(())
    }

    /// Rebuild the row list from the storage entry, as a page load does.
    fn load_from_storage(&mut self) -> TodoResult<()> {
        self.rows = match self.storage.get(&self.storage_key) {
            Some(payload) => serde_json::from_str::<Vec<StoredTodo>>(payload)?
                .into_iter()
                .map(|record| SimRow {
                    title: record.title,
                    completed: record.completed,
                })
                .collect(),
            None => Vec::new(),
        };
        Ok(())
    }

    /// Commit the in-flight edit; a blank buffer deletes the row.
    fn commit_edit(&mut self) -> TodoResult<()> {
        let Some(session) = self.editing.take() else {
            return Ok(());
        };
        let trimmed = session.buffer.trim().to_string();
        if trimmed.is_empty() {
            debug!(index = session.index, "blank edit commit removes row");
            self.rows.remove(session.index);
        } else {
            debug!(index = session.index, title = %trimmed, "edit committed");
            self.rows[session.index].title = trimmed;
        }
        self.persist()
    }

    /// Every exact text string currently rendered somewhere on the page.
    fn rendered_texts(&self) -> Vec<String> {
        let mut texts: Vec<String> = self
            .visible_indices()
            .into_iter()
            .map(|abs| self.rows[abs].title.clone())
            .collect();
        if !self.rows.is_empty() {
            texts.push(self.counter_text());
            for filter in [Filter::All, Filter::Active, Filter::Completed] {
                texts.push(filter.link_text().to_string());
            }
        }
        if self.any_completed() {
            texts.push(CLEAR_COMPLETED_TEXT.to_string());
        }
        texts
    }

    fn not_found(target: &Selector) -> TodoError {
        TodoError::ElementNotFound {
            selector: target.to_string(),
        }
    }

    /// Resolve a selector against the simulated widget tree.
    fn resolve(&self, target: &Selector) -> TodoResult<SimTarget> {
        match target {
            Selector::Placeholder(text) if text == NEW_TODO_PLACEHOLDER => {
                Ok(SimTarget::NewTodoInput)
            }
            Selector::Label(text) if text == TOGGLE_ALL_LABEL => Ok(SimTarget::ToggleAll),
            Selector::TestId(id) if id == TODO_ITEM_TEST_ID => Ok(SimTarget::Items),
            Selector::TestId(id) if id == TODO_TITLE_TEST_ID => Ok(SimTarget::Titles),
            Selector::TestId(id) if id == TODO_COUNT_TEST_ID => Ok(SimTarget::Counter),
            Selector::Role { role, name } if role == "link" => Filter::from_link_text(name)
                .map(SimTarget::FilterLink)
                .ok_or_else(|| Self::not_found(target)),
            Selector::Role { role, name } if role == "button" && name == CLEAR_COMPLETED_TEXT => {
                Ok(SimTarget::ClearCompleted)
            }
            Selector::Text(text) => Ok(SimTarget::TextProbe(text.clone())),
            Selector::Nth(base, index) => match self.resolve(base)? {
                SimTarget::Items => Ok(SimTarget::Item(*index)),
                _ => Err(Self::not_found(target)),
            },
            Selector::Within(base, child) => {
                let SimTarget::Item(ordinal) = self.resolve(base)? else {
                    return Err(Self::not_found(target));
                };
                match child.as_ref() {
                    Selector::Role { role, name }
                        if role == "textbox" && name == EDIT_TEXTBOX_NAME =>
                    {
                        Ok(SimTarget::EditField(ordinal))
                    }
                    Selector::Role { role, .. } if role == "checkbox" => {
                        Ok(SimTarget::Toggle(ordinal))
                    }
                    Selector::Label(text) if text == TOGGLE_TODO_LABEL => {
                        Ok(SimTarget::Toggle(ordinal))
                    }
                    Selector::Css(css) if css == "label" => Ok(SimTarget::ItemLabel(ordinal)),
                    Selector::Text(_) => Ok(SimTarget::ItemLabel(ordinal)),
                    Selector::TestId(id) if id == TODO_TITLE_TEST_ID => {
                        Ok(SimTarget::ItemLabel(ordinal))
                    }
                    _ => Err(Self::not_found(target)),
                }
            }
            _ => Err(Self::not_found(target)),
        }
    }
}

#[async_trait]
impl TodoDriver for SimDriver {
    async fn goto(&mut self, url: &str) -> TodoResult<()> {
        debug!(%url, "goto");
        self.loaded = true;
        self.input.clear();
        self.editing = None;
        self.filter = Filter::All;
        self.history = vec![Filter::All];
        self.load_from_storage()
    }

    async fn reload(&mut self) -> TodoResult<()> {
        self.ensure_loaded()?;
        debug!("reload");
        self.input.clear();
        self.editing = None;
        self.load_from_storage()
    }

    async fn go_back(&mut self) -> TodoResult<()> {
        self.ensure_loaded()?;
        if self.history.len() > 1 {
            self.history.pop();
            if let Some(filter) = self.history.last() {
                self.filter = *filter;
            }
        }
        debug!(filter = ?self.filter, "go_back");
        Ok(())
    }

    async fn click(&mut self, target: &Selector) -> TodoResult<()> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::FilterLink(filter) => {
                debug!(?filter, "filter link clicked");
                self.filter = filter;
                self.history.push(filter);
                Ok(())
            }
            SimTarget::ClearCompleted => {
                debug!("clear completed clicked");
                self.rows.retain(|row| !row.completed);
                self.persist()
            }
            SimTarget::Toggle(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                self.rows[abs].completed = !self.rows[abs].completed;
                self.persist()
            }
            SimTarget::ToggleAll => {
                let make_completed = self.active_count() > 0;
                for row in &mut self.rows {
                    row.completed = make_completed;
                }
                self.persist()
            }
            _ => Err(Self::not_found(target)),
        }
    }

    async fn double_click(&mut self, target: &Selector) -> TodoResult<()> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::Item(ordinal) | SimTarget::ItemLabel(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                debug!(index = abs, "edit mode entered");
                self.editing = Some(EditSession {
                    index: abs,
                    buffer: self.rows[abs].title.clone(),
                });
                Ok(())
            }
            _ => Err(Self::not_found(target)),
        }
    }

    async fn fill(&mut self, target: &Selector, text: &str) -> TodoResult<()> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::NewTodoInput => {
                self.input = text.to_string();
                Ok(())
            }
            SimTarget::EditField(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                if !self.row_editing(abs) {
                    return Err(Self::not_found(target));
                }
                if let Some(session) = self.editing.as_mut() {
                    session.buffer = text.to_string();
                }
                Ok(())
            }
            _ => Err(Self::not_found(target)),
        }
    }

    async fn press(&mut self, target: &Selector, key: Key) -> TodoResult<()> {
        self.ensure_loaded()?;
        match (self.resolve(target)?, key) {
            (SimTarget::NewTodoInput, Key::Enter) => {
                let trimmed = self.input.trim().to_string();
                if !trimmed.is_empty() {
                    debug!(title = %trimmed, "row appended");
                    self.rows.push(SimRow {
                        title: trimmed,
                        completed: false,
                    });
                    self.input.clear();
                    self.persist()?;
                }
                Ok(())
            }
            (SimTarget::NewTodoInput, Key::Escape) => Ok(()),
            (SimTarget::EditField(ordinal), key) => {
                let abs = self.abs_index(ordinal)?;
                if !self.row_editing(abs) {
                    return Err(Self::not_found(target));
                }
                match key {
                    Key::Enter => self.commit_edit(),
                    Key::Escape => {
                        debug!(index = abs, "edit cancelled");
                        self.editing = None;
                        Ok(())
                    }
                }
            }
            _ => Err(Self::not_found(target)),
        }
    }

    async fn blur(&mut self, target: &Selector) -> TodoResult<()> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::EditField(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                if !self.row_editing(abs) {
                    return Err(Self::not_found(target));
                }
                self.commit_edit()
            }
            SimTarget::NewTodoInput => Ok(()),
            _ => Err(Self::not_found(target)),
        }
    }

    async fn set_checked(&mut self, target: &Selector, checked: bool) -> TodoResult<()> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::Toggle(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                if self.row_editing(abs) {
                    return Err(Self::not_found(target));
                }
                self.rows[abs].completed = checked;
                self.persist()
            }
            SimTarget::ToggleAll => {
                for row in &mut self.rows {
                    row.completed = checked;
                }
                self.persist()
            }
            _ => Err(Self::not_found(target)),
        }
    }

    async fn is_checked(&self, target: &Selector) -> TodoResult<bool> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::Toggle(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                Ok(self.rows[abs].completed)
            }
            SimTarget::ToggleAll => {
                Ok(!self.rows.is_empty() && self.rows.iter().all(|row| row.completed))
            }
            _ => Err(Self::not_found(target)),
        }
    }

    async fn is_visible(&self, target: &Selector) -> TodoResult<bool> {
        self.ensure_loaded()?;
        let visible = match self.resolve(target)? {
            SimTarget::NewTodoInput => true,
            SimTarget::ToggleAll | SimTarget::Counter => !self.rows.is_empty(),
            SimTarget::ClearCompleted => self.any_completed(),
            SimTarget::Items | SimTarget::Titles => !self.visible_indices().is_empty(),
            SimTarget::Item(ordinal) => self.abs_index(ordinal).is_ok(),
            SimTarget::Toggle(ordinal) | SimTarget::ItemLabel(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                !self.row_editing(abs)
            }
            SimTarget::EditField(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                self.row_editing(abs)
            }
            SimTarget::FilterLink(_) => !self.rows.is_empty(),
            SimTarget::TextProbe(text) => self.rendered_texts().contains(&text),
        };
        trace!(target = %target, visible, "is_visible");
        Ok(visible)
    }

    async fn input_value(&self, target: &Selector) -> TodoResult<String> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::NewTodoInput => Ok(self.input.clone()),
            SimTarget::EditField(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                if !self.row_editing(abs) {
                    return Err(Self::not_found(target));
                }
                Ok(self
                    .editing
                    .as_ref()
                    .map(|session| session.buffer.clone())
                    .unwrap_or_default())
            }
            _ => Err(Self::not_found(target)),
        }
    }

    async fn texts(&self, target: &Selector) -> TodoResult<Vec<String>> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::Titles | SimTarget::Items => Ok(self
                .visible_indices()
                .into_iter()
                .map(|abs| self.rows[abs].title.clone())
                .collect()),
            SimTarget::Item(ordinal) | SimTarget::ItemLabel(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                Ok(vec![self.rows[abs].title.clone()])
            }
            SimTarget::Counter => Ok(vec![self.counter_text()]),
            SimTarget::ClearCompleted => Ok(if self.any_completed() {
                vec![CLEAR_COMPLETED_TEXT.to_string()]
            } else {
                Vec::new()
            }),
            SimTarget::FilterLink(filter) => Ok(vec![filter.link_text().to_string()]),
            SimTarget::TextProbe(text) => Ok(self
                .rendered_texts()
                .into_iter()
                .filter(|rendered| rendered == &text)
                .collect()),
            _ => Err(Self::not_found(target)),
        }
    }

    async fn class_names(&self, target: &Selector) -> TodoResult<Vec<String>> {
        self.ensure_loaded()?;
        match self.resolve(target)? {
            SimTarget::Items => Ok(self
                .visible_indices()
                .into_iter()
                .map(|abs| self.row_class(abs))
                .collect()),
            SimTarget::Item(ordinal) => {
                let abs = self.abs_index(ordinal)?;
                Ok(vec![self.row_class(abs)])
            }
            SimTarget::FilterLink(filter) => Ok(vec![if self.filter == filter {
                SELECTED_CLASS.to_string()
            } else {
                String::new()
            }]),
            _ => Err(Self::not_found(target)),
        }
    }

    async fn evaluate(&self, script: &str) -> TodoResult<serde_json::Value> {
        self.ensure_loaded()?;
        // The page object reads storage through one script shape; anything
        // else is outside the simulated surface.
        if let Some(key) = extract_get_item_key(script) {
            return Ok(self
                .storage
                .get(key)
                .map_or(serde_json::Value::Null, |payload| {
                    serde_json::Value::String(payload.clone())
                }));
        }
        Err(TodoError::EvalError {
            message: format!("unsupported script in simulation: {script}"),
        })
    }
}

/// Extract the key from a `localStorage.getItem("...")` expression.
fn extract_get_item_key(script: &str) -> Option<&str> {
    let (_, rest) = script.split_once("localStorage.getItem(\"")?;
    let (key, _) = rest.split_once("\")")?;
    Some(key)
}
