//! The clear-completed control.

use crate::common;
use tarea::TodoResult;

#[tokio::test]
async fn displays_button_when_an_item_is_completed() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(1).await?;
    app.check_todo(0).await?;

    app.verify_clear_completed_button_displayed().await?;
    Ok(())
}

#[tokio::test]
async fn removes_completed_items_when_clicked() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(2).await?;
    app.check_todo(0).await?;

    app.verify_clear_completed_button_displayed().await?;
    app.clear_completed().await?;
    app.verify_clear_completed_button_not_displayed().await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn clearing_twice_is_a_no_op() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;
    app.check_todo(1).await?;

    app.clear_completed().await?;
    app.verify_all_todos_displayed().await?;

    // No completed items remain, so the second activation changes nothing.
    app.clear_completed().await?;
    assert_eq!(app.todos().len(), 2);
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}
