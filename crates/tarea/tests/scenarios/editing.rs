//! Edit-mode behavior: trimming, blank removal, cancel.

use crate::common;
use tarea::{CommitMethod, SaveMethod, TodoResult};

#[tokio::test]
async fn hides_other_controls_when_editing() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;

    app.verify_controls_disabled_when_editing(0).await?;
    Ok(())
}

#[tokio::test]
async fn saves_edits_on_blur() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;

    app.edit_todo(1, SaveMethod::Blur, false).await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn trims_entered_text() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;

    // Padded input: the application stores and displays the trimmed name.
    app.edit_todo(1, SaveMethod::Blur, true).await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;

    // Trim idempotence: committing the already-trimmed name changes nothing.
    app.edit_todo(1, SaveMethod::Enter, true).await?;
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn removes_item_when_blank_text_entered() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;
    let surviving_last = app.todos()[2].name.clone();

    app.edit_todo_to_blank(1, CommitMethod::Enter).await?;

    // The list contracted and later indices shifted down by one.
    assert_eq!(app.todos().len(), 2);
    assert_eq!(app.todos()[1].name, surviving_last);
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn removes_item_when_blank_text_committed_on_blur() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;

    app.edit_todo_to_blank(1, CommitMethod::Blur).await?;

    assert_eq!(app.todos().len(), 2);
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn cancels_edits_on_escape() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;
    let names_before: Vec<String> =
        app.todos().iter().map(|todo| todo.name.clone()).collect();

    app.edit_todo(1, SaveMethod::Escape, true).await?;

    // Cancel is a no-op on state: same names on screen and in storage.
    let names_after: Vec<String> =
        app.todos().iter().map(|todo| todo.name.clone()).collect();
    assert_eq!(names_after, names_before);
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}
