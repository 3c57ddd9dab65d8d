//! Per-item completion and editing.

use crate::common;
use tarea::{SaveMethod, TodoResult};

#[tokio::test]
async fn allows_marking_items_as_complete() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;

    app.check_todo(0).await?;
    app.verify_todo_complete(0).await?;

    app.verify_todo_not_complete(1).await?;
    app.check_todo(1).await?;

    app.verify_toggle_all_checked().await?;
    app.verify_tasks_display_completed().await?;
    app.check_number_of_completed_todos_in_local_storage(2).await?;
    Ok(())
}

#[tokio::test]
async fn allows_unmarking_items_as_complete() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;

    app.check_todo(0).await?;
    app.verify_todo_complete(0).await?;
    app.verify_todo_not_complete(1).await?;
    app.check_number_of_completed_todos_in_local_storage(1).await?;

    app.uncheck_todo(0).await?;
    app.verify_todo_not_complete(0).await?;
    app.verify_todo_not_complete(1).await?;
    app.check_number_of_completed_todos_in_local_storage(0).await?;
    Ok(())
}

#[tokio::test]
async fn allows_editing_an_item() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;

    app.edit_todo(1, SaveMethod::Enter, false).await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}
