//! The to-do application page object.
//!
//! [`TodoApp`] binds one driver (one browser page) and exposes the tested
//! application's workflows as actions plus verifications. Actions perform UI
//! interactions and update a local mirror list of [`TodoItem`], the
//! driver's belief about application state. Verifications separately read
//! rendered or persisted state and compare it against mirror-derived
//! expectations.
//!
//! Invariant: after any sequence of actions and before any verification,
//! the mirror's length, order, names, and statuses match what the
//! application renders and persists. Actions do not validate their own
//! outcome; the exceptions are documented per method (the mark-all family
//! and the edit-mode precondition).

use tracing::debug;

use crate::config::AppConfig;
use crate::contract::{
    remaining_label, Filter, CLEAR_COMPLETED_TEXT, EDIT_TEXTBOX_NAME, NEW_TODO_PLACEHOLDER,
    SELECTED_CLASS, TODO_COUNT_TEST_ID, TODO_ITEM_TEST_ID, TODO_TITLE_TEST_ID, TOGGLE_ALL_LABEL,
    TOGGLE_TODO_LABEL,
};
use crate::driver::{Key, TodoDriver};
use crate::model::{StoredTodo, TodoItem, TodoStatus};
use crate::result::{TodoError, TodoResult};
use crate::selector::Selector;
use crate::wait::wait_until;

/// How an edit session is ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMethod {
    /// Keyboard submit; commits the trimmed text
    Enter,
    /// Focus loss; commits the trimmed text
    Blur,
    /// Cancel; the edited text is discarded
    Escape,
}

/// Commit gestures that persist a blank edit. Escape cancels the edit and
/// therefore cannot delete, so it is not a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMethod {
    /// Keyboard submit
    Enter,
    /// Focus loss
    Blur,
}

/// Page object for the to-do application, bound to one driver.
pub struct TodoApp<D> {
    driver: D,
    config: AppConfig,
    todos: Vec<TodoItem>,
    new_todo_field: Selector,
    toggle_all: Selector,
    todo_item: Selector,
}

impl<D: TodoDriver> TodoApp<D> {
    /// Bind a page object to `driver` with the default configuration.
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, AppConfig::default())
    }

    /// Bind a page object to `driver` with an explicit configuration.
    pub fn with_config(driver: D, config: AppConfig) -> Self {
        Self {
            driver,
            config,
            todos: Vec::new(),
            new_todo_field: Selector::placeholder(NEW_TODO_PLACEHOLDER),
            toggle_all: Selector::label(TOGGLE_ALL_LABEL),
            todo_item: Selector::test_id(TODO_ITEM_TEST_ID),
        }
    }

    /// The mirror list, in display order.
    #[must_use]
    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    /// The bound driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the bound driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    // ------------------------------------------------------------------
    // Selector helpers
    // ------------------------------------------------------------------

    fn item(&self, index: usize) -> Selector {
        self.todo_item.clone().nth(index)
    }

    fn item_toggle(&self, index: usize) -> Selector {
        self.item(index).find(Selector::label(TOGGLE_TODO_LABEL))
    }

    fn item_edit_field(&self, index: usize) -> Selector {
        self.item(index)
            .find(Selector::role("textbox", EDIT_TEXTBOX_NAME))
    }

    fn item_label(&self, index: usize) -> Selector {
        self.item(index).find(Selector::css("label"))
    }

    fn todo_titles(&self) -> Selector {
        Selector::test_id(TODO_TITLE_TEST_ID)
    }

    fn todo_count(&self) -> Selector {
        Selector::test_id(TODO_COUNT_TEST_ID)
    }

    fn clear_completed_button(&self) -> Selector {
        Selector::role("button", CLEAR_COMPLETED_TEXT)
    }

    fn filter_link(&self, filter: Filter) -> Selector {
        Selector::role("link", filter.link_text())
    }

    fn mismatch(what: &str, expected: &impl std::fmt::Debug, actual: &impl std::fmt::Debug) -> TodoError {
        TodoError::AssertionFailed {
            message: format!("{what}: expected {expected:?}, actual {actual:?}"),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Navigate to the application. Idempotent; safe to call repeatedly.
    pub async fn visit(&mut self) -> TodoResult<()> {
        debug!(url = %self.config.base_url, "visit");
        self.driver.goto(&self.config.base_url).await
    }

    /// Reload the page. The application re-renders from its persisted
    /// storage; the mirror is untouched.
    pub async fn reload(&mut self) -> TodoResult<()> {
        self.driver.reload().await
    }

    /// Go back one history entry (the application routes filters through
    /// history). The mirror is untouched.
    pub async fn go_back(&mut self) -> TodoResult<()> {
        self.driver.go_back().await
    }

    // ------------------------------------------------------------------
    // Mirror-state actions
    // ------------------------------------------------------------------

    /// Create one to-do with a generated name and append it to the mirror.
    pub async fn create_new_todo(&mut self) -> TodoResult<()> {
        let todo = TodoItem::fresh();
        debug!(name = %todo.name, "create new todo");
        self.driver.fill(&self.new_todo_field, &todo.name).await?;
        self.driver.press(&self.new_todo_field, Key::Enter).await?;
        self.todos.push(todo);
        Ok(())
    }

    /// Create `count` to-dos sequentially, preserving order.
    pub async fn create_new_todos(&mut self, count: usize) -> TodoResult<()> {
        for _ in 0..count {
            self.create_new_todo().await?;
        }
        Ok(())
    }

    /// Check the completion checkbox of the item at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is outside the mirror list (a scenario programming error).
    pub async fn check_todo(&mut self, index: usize) -> TodoResult<()> {
        assert!(index < self.todos.len(), "no todo at index {index}");
        let toggle = self.item_toggle(index);
        self.driver.set_checked(&toggle, true).await?;
        self.todos[index].status = TodoStatus::Completed;
        Ok(())
    }

    /// Uncheck the completion checkbox of the item at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is outside the mirror list (a scenario programming error).
    pub async fn uncheck_todo(&mut self, index: usize) -> TodoResult<()> {
        assert!(index < self.todos.len(), "no todo at index {index}");
        let toggle = self.item_toggle(index);
        self.driver.set_checked(&toggle, false).await?;
        self.todos[index].status = TodoStatus::Active;
        Ok(())
    }

    /// Check the global mark-all control and mark every mirror item
    /// `Completed`.
    ///
    /// As a documented side effect this asserts the control itself reads
    /// checked afterwards: the toggle's own visual state is part of what
    /// the action establishes.
    pub async fn mark_all_as_completed(&mut self) -> TodoResult<()> {
        debug!("mark all as completed");
        self.driver.set_checked(&self.toggle_all, true).await?;
        let checked = self.driver.is_checked(&self.toggle_all).await?;
        if !checked {
            return Err(Self::mismatch("toggle-all checked state", &true, &checked));
        }
        for todo in &mut self.todos {
            todo.status = TodoStatus::Completed;
        }
        Ok(())
    }

    /// Uncheck the global mark-all control and mark every mirror item
    /// `Active`.
    ///
    /// Asserts the control reads unchecked afterwards, mirroring
    /// [`Self::mark_all_as_completed`].
    pub async fn mark_all_as_not_completed(&mut self) -> TodoResult<()> {
        debug!("mark all as not completed");
        self.driver.set_checked(&self.toggle_all, false).await?;
        let checked = self.driver.is_checked(&self.toggle_all).await?;
        if checked {
            return Err(Self::mismatch("toggle-all checked state", &false, &checked));
        }
        for todo in &mut self.todos {
            todo.status = TodoStatus::Active;
        }
        Ok(())
    }

    /// Replace the item at `index` with a freshly generated one.
    ///
    /// Enters edit mode with a double-click and first asserts the edit
    /// field is pre-populated with the current name (precondition check).
    /// With `pad` the new text is surrounded by whitespace to exercise the
    /// application's trimming. `Enter` and `Blur` commit and replace the
    /// mirror item; `Escape` cancels and leaves the mirror unchanged.
    ///
    /// # Panics
    ///
    /// If `index` is outside the mirror list (a scenario programming error).
    pub async fn edit_todo(
        &mut self,
        index: usize,
        save_method: SaveMethod,
        pad: bool,
    ) -> TodoResult<()> {
        assert!(index < self.todos.len(), "no todo at index {index}");
        let replacement = TodoItem::fresh();
        let text = if pad {
            format!("     {}      ", replacement.name)
        } else {
            replacement.name.clone()
        };
        debug!(index, ?save_method, pad, "edit todo");

        self.open_editor(index).await?;
        let edit_field = self.item_edit_field(index);
        self.driver.fill(&edit_field, &text).await?;
        match save_method {
            SaveMethod::Enter => {
                self.driver.press(&edit_field, Key::Enter).await?;
                self.todos[index] = replacement;
            }
            SaveMethod::Blur => {
                self.driver.blur(&edit_field).await?;
                self.todos[index] = replacement;
            }
            SaveMethod::Escape => {
                self.driver.press(&edit_field, Key::Escape).await?;
            }
        }
        Ok(())
    }

    /// Clear the item at `index` to an empty title and commit, which the
    /// application treats as a deletion request. The mirror removes the
    /// item; subsequent indices shift down by one.
    ///
    /// # Panics
    ///
    /// If `index` is outside the mirror list (a scenario programming error).
    pub async fn edit_todo_to_blank(
        &mut self,
        index: usize,
        commit_method: CommitMethod,
    ) -> TodoResult<()> {
        assert!(index < self.todos.len(), "no todo at index {index}");
        debug!(index, ?commit_method, "edit todo to blank");

        self.open_editor(index).await?;
        let edit_field = self.item_edit_field(index);
        self.driver.fill(&edit_field, "").await?;
        match commit_method {
            CommitMethod::Enter => self.driver.press(&edit_field, Key::Enter).await?,
            CommitMethod::Blur => self.driver.blur(&edit_field).await?,
        }
        self.todos.remove(index);
        Ok(())
    }

    /// Double-click the row at `index` and assert the edit field is
    /// pre-populated with the mirror item's current name.
    async fn open_editor(&mut self, index: usize) -> TodoResult<()> {
        let row = self.item(index);
        self.driver.double_click(&row).await?;
        let edit_field = self.item_edit_field(index);
        let value = self.driver.input_value(&edit_field).await?;
        let expected = &self.todos[index].name;
        if &value != expected {
            return Err(Self::mismatch("edit field prefill", expected, &value));
        }
        Ok(())
    }

    /// Activate the clear-completed control. The mirror retains only
    /// `Active` items, preserving their relative order.
    pub async fn clear_completed(&mut self) -> TodoResult<()> {
        debug!("clear completed");
        let button = self.clear_completed_button();
        self.driver.click(&button).await?;
        self.todos.retain(|todo| todo.status == TodoStatus::Active);
        Ok(())
    }

    /// Switch to the Active filter view. Asserts the link is marked
    /// selected; the mirror is untouched (filtering is a view concern).
    pub async fn view_active(&mut self) -> TodoResult<()> {
        self.view(Filter::Active).await
    }

    /// Switch to the Completed filter view. Asserts the link is marked
    /// selected; the mirror is untouched.
    pub async fn view_completed(&mut self) -> TodoResult<()> {
        self.view(Filter::Completed).await
    }

    /// Switch to the All filter view. Asserts the link is marked selected;
    /// the mirror is untouched.
    pub async fn view_all(&mut self) -> TodoResult<()> {
        self.view(Filter::All).await
    }

    async fn view(&mut self, filter: Filter) -> TodoResult<()> {
        debug!(?filter, "switch filter view");
        let link = self.filter_link(filter);
        self.driver.click(&link).await?;
        let classes = self.driver.class_names(&link).await?;
        let selected = classes
            .first()
            .is_some_and(|class| class.split_whitespace().any(|c| c == SELECTED_CLASS));
        if !selected {
            return Err(Self::mismatch(
                "filter link class",
                &SELECTED_CLASS,
                &classes,
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Verification
    // ------------------------------------------------------------------

    fn names_with_status(&self, status: Option<TodoStatus>) -> Vec<String> {
        self.todos
            .iter()
            .filter(|todo| status.map_or(true, |s| todo.status == s))
            .map(|todo| todo.name.clone())
            .collect()
    }

    async fn verify_displayed(&self, status: Option<TodoStatus>) -> TodoResult<()> {
        let expected = self.names_with_status(status);
        let actual = self.driver.texts(&self.todo_titles()).await?;
        if actual != expected {
            return Err(Self::mismatch("displayed todos", &expected, &actual));
        }
        Ok(())
    }

    /// Assert the displayed titles equal the full mirror list, in order.
    pub async fn verify_all_todos_displayed(&self) -> TodoResult<()> {
        self.verify_displayed(None).await
    }

    /// Assert the displayed titles equal the mirror's `Active` items, in
    /// order.
    pub async fn verify_active_todos_displayed(&self) -> TodoResult<()> {
        self.verify_displayed(Some(TodoStatus::Active)).await
    }

    /// Assert the displayed titles equal the mirror's `Completed` items,
    /// in order.
    pub async fn verify_completed_todos_displayed(&self) -> TodoResult<()> {
        self.verify_displayed(Some(TodoStatus::Completed)).await
    }

    /// Assert every displayed row's completion styling matches its mirror
    /// status.
    pub async fn verify_tasks_display_completed(&self) -> TodoResult<()> {
        let expected: Vec<String> = self
            .todos
            .iter()
            .map(|todo| todo.status.css_class().to_string())
            .collect();
        let actual = self.driver.class_names(&self.todo_item).await?;
        if actual != expected {
            return Err(Self::mismatch("row styling", &expected, &actual));
        }
        Ok(())
    }

    /// Assert no displayed row carries completion styling.
    pub async fn verify_tasks_display_not_completed(&self) -> TodoResult<()> {
        let expected: Vec<String> = self.todos.iter().map(|_| String::new()).collect();
        let actual = self.driver.class_names(&self.todo_item).await?;
        if actual != expected {
            return Err(Self::mismatch("row styling", &expected, &actual));
        }
        Ok(())
    }

    /// Assert the row at `index` carries completion styling.
    pub async fn verify_todo_complete(&self, index: usize) -> TodoResult<()> {
        let actual = self.driver.class_names(&self.item(index)).await?;
        if actual.first().map(String::as_str) != Some("completed") {
            return Err(Self::mismatch("row styling", &"completed", &actual));
        }
        Ok(())
    }

    /// Assert the row at `index` carries no completion styling.
    pub async fn verify_todo_not_complete(&self, index: usize) -> TodoResult<()> {
        let actual = self.driver.class_names(&self.item(index)).await?;
        if actual.first().map(String::as_str) == Some("completed") {
            return Err(Self::mismatch("row styling", &"", &actual));
        }
        Ok(())
    }

    /// Assert the new-item input is empty (it clears after a submit).
    pub async fn verify_input_field_is_empty(&self) -> TodoResult<()> {
        let value = self.driver.input_value(&self.new_todo_field).await?;
        if !value.is_empty() {
            return Err(Self::mismatch("new-todo input", &"", &value));
        }
        Ok(())
    }

    /// Assert the remaining-count label matches the mirror length, with
    /// singular wording exactly at one item.
    ///
    /// The application counts remaining (active) items, so scenarios call
    /// this while no mirror item is completed; the mirror length then
    /// equals the rendered count.
    ///
    /// Checked through independent strategies for redundancy: the exact
    /// text is visible somewhere on the page, the counter element carries
    /// exactly that text, and the counter text contains the numeric count.
    pub async fn verify_item_count_correct(&self) -> TodoResult<()> {
        let expected = remaining_label(self.todos.len());

        let visible = self.driver.is_visible(&Selector::text(expected.as_str())).await?;
        if !visible {
            return Err(Self::mismatch("count text visible", &expected, &visible));
        }

        let counter = self.todo_count();
        let actual = self.driver.texts(&counter).await?;
        if actual != vec![expected.clone()] {
            return Err(Self::mismatch("count text", &expected, &actual));
        }

        let digits = self.todos.len().to_string();
        let contains = actual.first().is_some_and(|text| text.contains(&digits));
        if !contains {
            return Err(Self::mismatch("count substring", &digits, &actual));
        }
        Ok(())
    }

    /// Assert the global mark-all control reads checked.
    pub async fn verify_toggle_all_checked(&self) -> TodoResult<()> {
        let checked = self.driver.is_checked(&self.toggle_all).await?;
        if !checked {
            return Err(Self::mismatch("toggle-all checked state", &true, &checked));
        }
        Ok(())
    }

    /// Assert the global mark-all control reads unchecked.
    pub async fn verify_toggle_all_not_checked(&self) -> TodoResult<()> {
        let checked = self.driver.is_checked(&self.toggle_all).await?;
        if checked {
            return Err(Self::mismatch("toggle-all checked state", &false, &checked));
        }
        Ok(())
    }

    /// Assert the clear-completed control is visible.
    pub async fn verify_clear_completed_button_displayed(&self) -> TodoResult<()> {
        let visible = self.driver.is_visible(&self.clear_completed_button()).await?;
        if !visible {
            return Err(Self::mismatch("clear-completed visible", &true, &visible));
        }
        Ok(())
    }

    /// Assert the clear-completed control is not visible.
    pub async fn verify_clear_completed_button_not_displayed(&self) -> TodoResult<()> {
        let visible = self.driver.is_visible(&self.clear_completed_button()).await?;
        if visible {
            return Err(Self::mismatch("clear-completed visible", &false, &visible));
        }
        Ok(())
    }

    /// Enter edit mode on the row at `index` and assert its checkbox and
    /// label are hidden while editing; finishes with the full storage
    /// consistency check. The row is left in edit mode.
    ///
    /// # Panics
    ///
    /// If `index` is outside the mirror list (a scenario programming error).
    pub async fn verify_controls_disabled_when_editing(&mut self, index: usize) -> TodoResult<()> {
        assert!(index < self.todos.len(), "no todo at index {index}");
        let row = self.item(index);
        self.driver.double_click(&row).await?;

        let toggle_visible = self.driver.is_visible(&self.item_toggle(index)).await?;
        if toggle_visible {
            return Err(Self::mismatch("toggle visible while editing", &false, &toggle_visible));
        }
        let label_visible = self.driver.is_visible(&self.item_label(index)).await?;
        if label_visible {
            return Err(Self::mismatch("label visible while editing", &false, &label_visible));
        }
        self.verify_local_storage().await
    }

    // ------------------------------------------------------------------
    // Persistence verification
    // ------------------------------------------------------------------

    /// Read the application's persisted records. A missing entry reads as
    /// an empty list (the application writes it lazily).
    pub async fn read_storage(&self) -> TodoResult<Vec<StoredTodo>> {
        let script = format!(
            "window.localStorage.getItem(\"{}\")",
            self.config.storage_key
        );
        match self.driver.evaluate(&script).await? {
            serde_json::Value::Null => Ok(Vec::new()),
            serde_json::Value::String(payload) => Ok(serde_json::from_str(&payload)?),
            other => Err(TodoError::EvalError {
                message: format!("unexpected storage payload: {other}"),
            }),
        }
    }

    /// Wait until the persisted storage holds exactly as many entries as
    /// the mirror and every mirror name appears among the stored titles.
    ///
    /// Persistence may lag the UI update, so this polls with the
    /// configured window rather than asserting instantaneously.
    pub async fn verify_local_storage(&self) -> TodoResult<()> {
        let this = self;
        wait_until(&self.config.wait, move || this.storage_matches_mirror()).await
    }

    /// One storage-consistency probe for [`Self::verify_local_storage`].
    async fn storage_matches_mirror(&self) -> TodoResult<Option<String>> {
        let stored = self.read_storage().await?;
        if stored.len() != self.todos.len() {
            return Ok(Some(format!(
                "expected {} stored entries, got {}",
                self.todos.len(),
                stored.len()
            )));
        }
        for todo in &self.todos {
            if !stored.iter().any(|record| record.title == todo.name) {
                return Ok(Some(format!("stored entries missing title {:?}", todo.name)));
            }
        }
        Ok(None)
    }

    /// Wait until the persisted storage holds exactly `expected` completed
    /// entries.
    pub async fn check_number_of_completed_todos_in_local_storage(
        &self,
        expected: usize,
    ) -> TodoResult<()> {
        let this = self;
        wait_until(&self.config.wait, move || {
            this.stored_completed_count_matches(expected)
        })
        .await
    }

    /// One completed-count probe for
    /// [`Self::check_number_of_completed_todos_in_local_storage`].
    async fn stored_completed_count_matches(&self, expected: usize) -> TodoResult<Option<String>> {
        let stored = self.read_storage().await?;
        let actual = stored.iter().filter(|record| record.completed).count();
        if actual == expected {
            Ok(None)
        } else {
            Ok(Some(format!(
                "expected {expected} completed stored entries, got {actual}"
            )))
        }
    }
}
