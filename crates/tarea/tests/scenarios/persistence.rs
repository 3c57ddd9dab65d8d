//! Persistence across page reloads.

use crate::common;
use tarea::TodoResult;

#[tokio::test]
async fn persists_its_data_across_reload() -> TodoResult<()> {
    let mut app = common::todo_app();
    app.visit().await?;
    app.create_new_todos(3).await?;
    app.check_todo(1).await?;

    app.verify_all_todos_displayed().await?;
    app.verify_local_storage().await?;

    app.reload().await?;

    // The application re-renders from storage: same titles, same styling.
    app.verify_all_todos_displayed().await?;
    app.verify_tasks_display_completed().await?;
    app.verify_local_storage().await?;
    app.check_number_of_completed_todos_in_local_storage(1).await?;
    Ok(())
}
