use crate::models::{ColumnId, Task};

/// The card picked up by an in-flight drag and the lane it left. Lives
/// between `dragstart` and the drop (or `dragend`) that ends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub task: Task,
    pub source: ColumnId,
}

impl DragSession {
    pub fn new(task: Task, source: ColumnId) -> Self {
        Self { task, source }
    }

    pub fn is_from(&self, column: ColumnId) -> bool {
        self.source == column
    }

    pub fn carries(&self, task_id: &str) -> bool {
        self.task.id == task_id
    }
}
