//! Property tests over the page-object workflows.

use proptest::prelude::*;
use tarea::TodoStatus;
use tokio::runtime::Runtime;

use crate::common;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// However many items a scenario creates, the mirror length equals the
    /// number of calls and the display shows them in call order.
    #[test]
    fn creating_n_items_mirrors_and_displays_n(count in 1usize..8) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let mut app = common::todo_app();
            app.visit().await.unwrap();
            app.create_new_todos(count).await.unwrap();

            prop_assert_eq!(app.todos().len(), count);
            app.verify_all_todos_displayed().await.unwrap();
            app.verify_item_count_correct().await.unwrap();
            app.verify_local_storage().await.unwrap();
            Ok(())
        })?;
    }

    /// Mark-all followed by unmark-all restores every item to Active.
    #[test]
    fn mark_all_round_trip_restores_active(count in 1usize..6) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let mut app = common::todo_app();
            app.visit().await.unwrap();
            app.create_new_todos(count).await.unwrap();

            app.mark_all_as_completed().await.unwrap();
            app.mark_all_as_not_completed().await.unwrap();

            prop_assert!(app
                .todos()
                .iter()
                .all(|todo| todo.status == TodoStatus::Active));
            app.verify_tasks_display_not_completed().await.unwrap();
            Ok(())
        })?;
    }
}
