//! The remaining-items counter.

use crate::common;
use tarea::TodoResult;

#[tokio::test]
async fn displays_current_number_of_todo_items() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;

    // Singular wording at exactly one item.
    app.create_new_todos(1).await?;
    app.verify_item_count_correct().await?;

    // Plural from two onward.
    app.create_new_todos(1).await?;
    app.verify_item_count_correct().await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;
    Ok(())
}

#[tokio::test]
async fn counts_larger_lists() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;

    app.create_new_todos(5).await?;
    app.verify_item_count_correct().await?;
    app.verify_all_todos_displayed().await?;
    Ok(())
}
