//! Creating new to-do items.

use crate::common;
use tarea::TodoResult;

#[tokio::test]
async fn allows_adding_todo_items() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;

    app.create_new_todo().await?;
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;

    app.create_new_todo().await?;
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn clears_text_input_when_item_added() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;

    app.create_new_todo().await?;
    app.verify_input_field_is_empty().await?;
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn appends_new_items_to_bottom_of_list() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;

    app.create_new_todos(3).await?;
    app.verify_item_count_correct().await?;
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn visit_is_idempotent() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.visit().await?;

    app.create_new_todo().await?;
    app.verify_all_todos_displayed().await?;
    Ok(())
}
