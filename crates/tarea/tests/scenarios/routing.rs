//! Filter views and history routing.

use crate::common;
use tarea::TodoResult;

#[tokio::test]
async fn displays_active_items() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;
    app.check_todo(1).await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    app.check_number_of_completed_todos_in_local_storage(1).await?;

    // Active view shows the first and third item, in order.
    app.view_active().await?;
    app.verify_active_todos_displayed().await?;
    app.verify_local_storage().await?;
    app.check_number_of_completed_todos_in_local_storage(1).await?;
    Ok(())
}

#[tokio::test]
async fn displays_completed_items() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;
    app.check_todo(1).await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    app.check_number_of_completed_todos_in_local_storage(1).await?;

    // Completed view shows exactly the second item.
    app.view_completed().await?;
    app.verify_completed_todos_displayed().await?;
    app.verify_local_storage().await?;
    app.check_number_of_completed_todos_in_local_storage(1).await?;
    Ok(())
}

#[tokio::test]
async fn displays_all_items() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;
    app.check_todo(1).await?;

    app.view_all().await?;
    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    app.check_number_of_completed_todos_in_local_storage(1).await?;
    Ok(())
}

#[tokio::test]
async fn respects_the_back_button() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;
    app.check_todo(1).await?;

    app.verify_all_todos_displayed().await?;

    app.view_active().await?;
    app.verify_active_todos_displayed().await?;

    app.go_back().await?;
    app.verify_all_todos_displayed().await?;

    app.view_completed().await?;
    app.verify_completed_todos_displayed().await?;

    app.go_back().await?;
    app.verify_all_todos_displayed().await?;
    Ok(())
}
