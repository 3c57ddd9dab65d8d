//! Shared fixtures for the scenario suite.

use tarea::sim::SimDriver;
use tarea::TodoApp;

/// Initialize tracing once for the scenario binary. Honors `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A page object bound to a fresh simulated page. One per scenario;
/// scenarios never share driver state.
pub fn todo_app() -> TodoApp<SimDriver> {
    init_tracing();
    TodoApp::new(SimDriver::new())
}
