pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod view;

use std::path::PathBuf;

/// Slot path from `TODOLIST_FILE`, defaulting to `todos.json` in the
/// working directory.
pub fn slot_path_from_env() -> PathBuf {
    std::env::var("TODOLIST_FILE")
        .unwrap_or_else(|_| "todos.json".to_string())
        .into()
}
