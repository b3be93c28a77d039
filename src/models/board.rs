use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::task::Task;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "inprogress",
            ColumnId::Done => "done",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }

    /// Board order. The position in this array is the column's index.
    pub fn all() -> [ColumnId; 3] {
        [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done]
    }

    fn index(&self) -> usize {
        match self {
            ColumnId::Todo => 0,
            ColumnId::InProgress => 1,
            ColumnId::Done => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    fn empty(id: ColumnId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

/// The three fixed lanes in board order. Serialized as a bare JSON array of
/// columns, which is the layout stored under the board key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Board {
    columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: ColumnId::all().into_iter().map(Column::empty).collect(),
        }
    }
}

impl Board {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.index()]
    }

    pub(crate) fn column_mut(&mut self, id: ColumnId) -> &mut Column {
        &mut self.columns[id.index()]
    }

    pub fn find_task(&self, task_id: &str) -> Option<(ColumnId, &Task)> {
        self.columns().iter().find_map(|column| {
            column
                .tasks
                .iter()
                .find(|t| t.id == task_id)
                .map(|task| (column.id, task))
        })
    }

    pub fn task_count(&self) -> usize {
        self.columns().iter().map(|c| c.tasks.len()).sum()
    }

    /// Checks the layout a decoded value must have before it can stand in for
    /// the board: exactly the three lanes in board order and no task id held
    /// twice anywhere.
    pub fn check_layout(&self) -> Result<(), String> {
        let ids: Vec<ColumnId> = self.columns.iter().map(|c| c.id).collect();
        if ids != ColumnId::all() {
            return Err(format!(
                "expected columns [todo, inprogress, done], found {:?}",
                ids.iter().map(|id| id.as_str()).collect::<Vec<_>>()
            ));
        }

        let mut seen = HashSet::new();
        for task in self.columns.iter().flat_map(|c| c.tasks.iter()) {
            if !seen.insert(task.id.as_str()) {
                return Err(format!("task id {} appears more than once", task.id));
            }
        }
        Ok(())
    }
}
