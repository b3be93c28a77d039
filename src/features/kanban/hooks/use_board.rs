use leptos::prelude::*;

use crate::config::AppConfig;
use crate::core::services::BrowserStorage;
use crate::features::kanban::services::BoardStore;
use crate::models::{ColumnId, Priority, Task};

pub type BrowserBoardStore = BoardStore<BrowserStorage>;

/// Reactive handle on the session's board store. Copy it into any closure;
/// reads are tracked, and every operation goes through the store so the
/// storage slot is written as part of the same call.
#[derive(Clone, Copy)]
pub struct BoardHandle {
    store: RwSignal<BrowserBoardStore>,
}

impl BoardHandle {
    pub fn tasks(&self, column: ColumnId) -> Vec<Task> {
        self.store.with(|s| s.column(column).tasks.clone())
    }

    /// Lane titles are fixed for the session, so this read is untracked.
    pub fn column_title(&self, column: ColumnId) -> String {
        self.store
            .with_untracked(|s| s.column(column).title.clone())
    }

    pub fn task_count(&self) -> usize {
        self.store.with(|s| s.board().task_count())
    }

    pub fn is_drag_source(&self, column: ColumnId) -> bool {
        self.store
            .with(|s| s.dragging().is_some_and(|d| d.is_from(column)))
    }

    pub fn is_dragged(&self, task_id: &str) -> bool {
        self.store
            .with(|s| s.dragging().is_some_and(|d| d.carries(task_id)))
    }

    pub fn add_task(
        &self,
        column: ColumnId,
        title: String,
        description: String,
        priority: Priority,
    ) -> bool {
        self.store
            .try_update(|s| s.add_task(column, &title, description, priority))
            .flatten()
            .is_some()
    }

    pub fn edit_task(
        &self,
        task_id: String,
        column: ColumnId,
        title: String,
        description: String,
        priority: Priority,
    ) -> bool {
        self.store
            .try_update(|s| s.edit_task(&task_id, column, &title, description, priority))
            .unwrap_or(false)
    }

    pub fn delete_task(&self, task_id: String, column: ColumnId) {
        self.store.update(|s| {
            s.delete_task(&task_id, column);
        });
    }

    pub fn begin_drag(&self, task: Task, source: ColumnId) {
        self.store.update(|s| s.begin_drag(task, source));
    }

    pub fn commit_drop(&self, dest: ColumnId) {
        self.store.update(|s| {
            s.commit_drop(dest);
        });
    }

    /// Clears a drag that ended without a drop on a column. Leaves the store
    /// untouched when the drop already consumed the session.
    pub fn cancel_drag(&self) {
        if self.store.with_untracked(|s| s.dragging().is_some()) {
            self.store.update(|s| s.cancel_drag());
        }
    }
}

/// Opens the board from local storage and provides the handle to the
/// component tree. Called once from the application root.
pub fn provide_board(config: &AppConfig) -> BoardHandle {
    let store = BoardStore::open(BrowserStorage, config.storage_key.clone());
    let handle = BoardHandle {
        store: RwSignal::new(store),
    };
    provide_context(handle);
    handle
}

pub fn use_board() -> BoardHandle {
    expect_context::<BoardHandle>()
}
