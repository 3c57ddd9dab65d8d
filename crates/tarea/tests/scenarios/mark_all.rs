//! The global mark-all-as-complete control.

use crate::common;
use tarea::{TodoResult, TodoStatus};

#[tokio::test]
async fn marks_all_items_as_completed() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;

    app.mark_all_as_completed().await?;

    app.verify_tasks_display_completed().await?;
    app.check_number_of_completed_todos_in_local_storage(3).await?;
    Ok(())
}

#[tokio::test]
async fn clears_complete_state_of_all_items() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;

    app.mark_all_as_completed().await?;
    app.mark_all_as_not_completed().await?;

    // Round trip: every item is Active again, on screen and in the mirror.
    app.verify_tasks_display_not_completed().await?;
    assert!(app
        .todos()
        .iter()
        .all(|todo| todo.status == TodoStatus::Active));
    app.check_number_of_completed_todos_in_local_storage(0).await?;
    Ok(())
}

#[tokio::test]
async fn toggle_all_updates_as_items_are_completed_and_cleared() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;

    app.mark_all_as_completed().await?;
    app.verify_tasks_display_completed().await?;
    app.check_number_of_completed_todos_in_local_storage(3).await?;

    // Unchecking one item takes the global toggle out of its checked state.
    app.uncheck_todo(0).await?;
    app.verify_toggle_all_not_checked().await?;

    app.check_todo(0).await?;
    app.check_number_of_completed_todos_in_local_storage(3).await?;

    app.verify_toggle_all_checked().await?;
    app.verify_tasks_display_completed().await?;
    Ok(())
}
