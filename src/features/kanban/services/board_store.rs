use log::{debug, error, info, warn};

use super::drag::DragSession;
use crate::core::services::{load_board, save_board, KeyValueStore};
use crate::models::{is_valid_title, Board, Column, ColumnId, Priority, Task};

/// Owns the board for a session and keeps the storage slot in step with it.
///
/// Every mutating call either changes nothing or changes the board and
/// writes the whole board back before returning. A failed write is logged
/// and otherwise ignored: the in-memory board stays the source of truth
/// for the rest of the session.
#[derive(Debug)]
pub struct BoardStore<S> {
    board: Board,
    storage: S,
    key: String,
    drag: Option<DragSession>,
}

impl<S: KeyValueStore> BoardStore<S> {
    /// Hydrates from the slot under `key`, or starts from the empty board
    /// when the slot is empty or holds something unusable.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let board = match load_board(&storage, &key) {
            Ok(Some(board)) => {
                info!("Loaded board from {} with {} tasks", key, board.task_count());
                board
            }
            Ok(None) => {
                debug!("No stored board under {}, starting empty", key);
                Board::default()
            }
            Err(e) => {
                warn!("Discarding stored board under {}: {}", key, e);
                Board::default()
            }
        };

        Self {
            board,
            storage,
            key,
            drag: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        self.board.column(id)
    }

    pub fn dragging(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Appends a new task to `column` and returns its id, or `None` when the
    /// title is blank.
    pub fn add_task(
        &mut self,
        column: ColumnId,
        title: &str,
        description: String,
        priority: Priority,
    ) -> Option<String> {
        if !is_valid_title(title) {
            return None;
        }

        let task = Task::new(title, description, priority);
        let task_id = task.id.clone();
        self.board.column_mut(column).tasks.push(task);
        debug!("Added task {} to {}", task_id, column.as_str());
        self.commit();
        Some(task_id)
    }

    /// Replaces the editable fields of `task_id` inside `column`. Returns
    /// false for a blank title or when the column has no such task.
    pub fn edit_task(
        &mut self,
        task_id: &str,
        column: ColumnId,
        title: &str,
        description: String,
        priority: Priority,
    ) -> bool {
        if !is_valid_title(title) {
            return false;
        }

        let Some(task) = self
            .board
            .column_mut(column)
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
        else {
            return false;
        };

        task.update_details(title, description, priority);
        debug!("Edited task {} in {}", task_id, column.as_str());
        self.commit();
        true
    }

    /// Removes `task_id` from `column`. Deleting an absent task changes
    /// nothing and writes nothing.
    pub fn delete_task(&mut self, task_id: &str, column: ColumnId) -> bool {
        let tasks = &mut self.board.column_mut(column).tasks;
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        if tasks.len() == before {
            return false;
        }

        debug!("Deleted task {} from {}", task_id, column.as_str());
        self.commit();
        true
    }

    /// Moves a task to the end of `dest`. The task is looked up by id in
    /// `source`, so a stale copy can neither duplicate nor drop a card: if the
    /// source no longer holds it, nothing happens. The card that lands in
    /// `dest` is the one stored in `source`, not the caller's copy.
    pub fn move_task(&mut self, task: &Task, source: ColumnId, dest: ColumnId) -> bool {
        if source == dest {
            return false;
        }

        let Some(index) = self.board.column(source).position_of(&task.id) else {
            match self.board.find_task(&task.id) {
                Some((actual, _)) => debug!(
                    "Task {} is in {}, not {}, ignoring move",
                    task.id,
                    actual.as_str(),
                    source.as_str()
                ),
                None => debug!("Task {} no longer exists, ignoring move", task.id),
            }
            return false;
        };

        let moved = self.board.column_mut(source).tasks.remove(index);
        self.board.column_mut(dest).tasks.push(moved);
        debug!(
            "Moved task {} from {} to {}",
            task.id,
            source.as_str(),
            dest.as_str()
        );
        self.commit();
        true
    }

    /// Records the card being dragged. Starting a drag replaces any session
    /// that was never dropped.
    pub fn begin_drag(&mut self, task: Task, source: ColumnId) {
        self.drag = Some(DragSession::new(task, source));
    }

    /// Ends the drag session by moving its card into `dest`. Without a
    /// session, or when dropped back onto the lane it came from, nothing
    /// moves. The session is cleared either way.
    pub fn commit_drop(&mut self, dest: ColumnId) -> bool {
        match self.drag.take() {
            Some(session) => self.move_task(&session.task, session.source, dest),
            None => false,
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    fn commit(&self) {
        if let Err(e) = save_board(&self.storage, &self.key, &self.board) {
            error!("Board change kept in memory only: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::core::services::MemoryStorage;

    const KEY: &str = "kanban-tasks-v1";

    fn open_empty() -> (BoardStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::default();
        (BoardStore::open(storage.clone(), KEY), storage)
    }

    fn stored_board(storage: &MemoryStorage) -> Board {
        serde_json::from_str(&storage.value(KEY).expect("board was written")).unwrap()
    }

    fn ids(store: &BoardStore<MemoryStorage>, column: ColumnId) -> Vec<String> {
        store.column(column).tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn starts_with_default_board_when_nothing_is_stored() {
        let (store, storage) = open_empty();
        assert_eq!(store.board(), &Board::default());
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn hydrates_from_stored_board() {
        let (mut first, storage) = open_empty();
        first.add_task(ColumnId::Done, "Invoice client", String::new(), Priority::Low);

        let second = BoardStore::open(storage, KEY);
        assert_eq!(second.board(), first.board());
    }

    #[test]
    fn corrupted_storage_falls_back_to_defaults() {
        let storage = MemoryStorage::with_value(KEY, "][");
        let store = BoardStore::open(storage, KEY);
        assert_eq!(store.board(), &Board::default());
    }

    #[test]
    fn incompatible_storage_falls_back_to_defaults() {
        let storage = MemoryStorage::with_value(KEY, r#"{"todo":[]}"#);
        let store = BoardStore::open(storage, KEY);
        assert_eq!(store.board(), &Board::default());
    }

    #[test]
    fn unreadable_storage_falls_back_to_defaults() {
        let storage = MemoryStorage::default();
        storage.fail_reads(true);
        let store = BoardStore::open(storage, KEY);
        assert_eq!(store.board(), &Board::default());
    }

    #[test]
    fn add_appends_and_persists() {
        let (mut store, storage) = open_empty();
        let first = store
            .add_task(ColumnId::Todo, "First", String::new(), Priority::Medium)
            .unwrap();
        let second = store
            .add_task(ColumnId::Todo, "Second", "notes".to_string(), Priority::High)
            .unwrap();

        assert_eq!(ids(&store, ColumnId::Todo), vec![first, second]);
        assert_eq!(storage.writes(), 2);
        assert_eq!(&stored_board(&storage), store.board());
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let (mut store, storage) = open_empty();
        assert_eq!(
            store.add_task(ColumnId::Todo, "   ", String::new(), Priority::High),
            None
        );
        assert!(store.column(ColumnId::Todo).tasks.is_empty());
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn blank_edit_leaves_task_untouched() {
        let (mut store, storage) = open_empty();
        let id = store
            .add_task(ColumnId::Todo, "Keep me", String::new(), Priority::Medium)
            .unwrap();

        assert!(!store.edit_task(&id, ColumnId::Todo, "  ", "x".to_string(), Priority::Low));
        let task = &store.column(ColumnId::Todo).tasks[0];
        assert_eq!(task.title, "Keep me");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn edit_requires_matching_column() {
        let (mut store, _) = open_empty();
        let id = store
            .add_task(ColumnId::Todo, "Draft", String::new(), Priority::Medium)
            .unwrap();

        assert!(!store.edit_task(&id, ColumnId::Done, "Other", String::new(), Priority::Low));
        assert_eq!(store.column(ColumnId::Todo).tasks[0].title, "Draft");
    }

    #[test]
    fn delete_of_absent_task_is_idempotent() {
        let (mut store, storage) = open_empty();
        let id = store
            .add_task(ColumnId::Todo, "Once", String::new(), Priority::Medium)
            .unwrap();
        assert!(store.delete_task(&id, ColumnId::Todo));

        let before = store.board().clone();
        let writes = storage.writes();
        assert!(!store.delete_task(&id, ColumnId::Todo));
        assert!(!store.delete_task("never-existed", ColumnId::Done));
        assert_eq!(store.board(), &before);
        assert_eq!(storage.writes(), writes);
    }

    #[test]
    fn move_appends_to_destination_only() {
        let (mut store, _) = open_empty();
        let existing = store
            .add_task(ColumnId::Done, "Already done", String::new(), Priority::Low)
            .unwrap();
        let wip = store
            .add_task(ColumnId::InProgress, "Untouched", String::new(), Priority::Low)
            .unwrap();
        let id = store
            .add_task(ColumnId::Todo, "Finish", String::new(), Priority::High)
            .unwrap();

        let task = store.column(ColumnId::Todo).tasks[0].clone();
        assert!(store.move_task(&task, ColumnId::Todo, ColumnId::Done));

        assert!(store.column(ColumnId::Todo).tasks.is_empty());
        assert_eq!(ids(&store, ColumnId::Done), vec![existing, id]);
        assert_eq!(ids(&store, ColumnId::InProgress), vec![wip]);
    }

    #[test]
    fn move_within_same_column_is_a_noop() {
        let (mut store, storage) = open_empty();
        store.add_task(ColumnId::Todo, "Stay", String::new(), Priority::Medium);
        let task = store.column(ColumnId::Todo).tasks[0].clone();

        assert!(!store.move_task(&task, ColumnId::Todo, ColumnId::Todo));
        assert_eq!(store.column(ColumnId::Todo).tasks.len(), 1);
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn move_from_wrong_source_neither_duplicates_nor_loses() {
        let (mut store, _) = open_empty();
        store.add_task(ColumnId::InProgress, "Here", String::new(), Priority::Medium);
        let task = store.column(ColumnId::InProgress).tasks[0].clone();

        assert!(!store.move_task(&task, ColumnId::Todo, ColumnId::Done));
        assert_eq!(store.column(ColumnId::InProgress).tasks.len(), 1);
        assert!(store.column(ColumnId::Done).tasks.is_empty());
    }

    #[test]
    fn drop_commits_move_and_clears_session() {
        let (mut store, _) = open_empty();
        let id = store
            .add_task(ColumnId::Todo, "Drag me", String::new(), Priority::Medium)
            .unwrap();
        let task = store.column(ColumnId::Todo).tasks[0].clone();

        store.begin_drag(task, ColumnId::Todo);
        assert!(store.dragging().unwrap().is_from(ColumnId::Todo));
        assert!(store.dragging().unwrap().carries(&id));

        assert!(store.commit_drop(ColumnId::InProgress));
        assert!(store.dragging().is_none());
        assert_eq!(ids(&store, ColumnId::InProgress), vec![id]);

        assert!(!store.commit_drop(ColumnId::Done));
    }

    #[test]
    fn drop_on_source_column_clears_session_without_moving() {
        let (mut store, _) = open_empty();
        store.add_task(ColumnId::Todo, "Drag me", String::new(), Priority::Medium);
        let task = store.column(ColumnId::Todo).tasks[0].clone();

        store.begin_drag(task, ColumnId::Todo);
        assert!(!store.commit_drop(ColumnId::Todo));
        assert!(store.dragging().is_none());
        assert_eq!(store.column(ColumnId::Todo).tasks.len(), 1);
    }

    #[test]
    fn cancelled_drag_moves_nothing() {
        let (mut store, _) = open_empty();
        store.add_task(ColumnId::Todo, "Drag me", String::new(), Priority::Medium);
        let task = store.column(ColumnId::Todo).tasks[0].clone();

        store.begin_drag(task, ColumnId::Todo);
        store.cancel_drag();
        assert!(!store.commit_drop(ColumnId::Done));
        assert_eq!(store.column(ColumnId::Todo).tasks.len(), 1);
    }

    #[test]
    fn stale_drag_moves_current_version() {
        let (mut store, _) = open_empty();
        let id = store
            .add_task(ColumnId::Todo, "Old title", String::new(), Priority::Low)
            .unwrap();
        let stale = store.column(ColumnId::Todo).tasks[0].clone();

        store.begin_drag(stale, ColumnId::Todo);
        store.edit_task(&id, ColumnId::Todo, "New title", String::new(), Priority::High);
        assert!(store.commit_drop(ColumnId::Done));

        let moved = &store.column(ColumnId::Done).tasks[0];
        assert_eq!(moved.title, "New title");
        assert_eq!(moved.priority, Priority::High);
    }

    #[test]
    fn drag_of_deleted_task_is_discarded() {
        let (mut store, _) = open_empty();
        let id = store
            .add_task(ColumnId::Todo, "Gone soon", String::new(), Priority::Low)
            .unwrap();
        let task = store.column(ColumnId::Todo).tasks[0].clone();

        store.begin_drag(task, ColumnId::Todo);
        store.delete_task(&id, ColumnId::Todo);
        assert!(!store.commit_drop(ColumnId::Done));
        assert_eq!(store.board().task_count(), 0);
    }

    #[test]
    fn failed_write_keeps_change_in_memory() {
        let (mut store, storage) = open_empty();
        storage.fail_writes(true);

        let id = store
            .add_task(ColumnId::Todo, "Survives", String::new(), Priority::Medium)
            .unwrap();
        assert!(store.board().find_task(&id).is_some());
        assert_eq!(storage.value(KEY), None);

        storage.fail_writes(false);
        store.add_task(ColumnId::Todo, "Next", String::new(), Priority::Medium);
        assert_eq!(stored_board(&storage).task_count(), 2);
    }

    #[test]
    fn add_move_edit_delete_scenario() {
        let (mut store, storage) = open_empty();

        let id = store
            .add_task(ColumnId::Todo, "Write report", String::new(), Priority::High)
            .unwrap();
        let todo = &store.column(ColumnId::Todo).tasks;
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].title, "Write report");
        assert_eq!(todo[0].priority, Priority::High);

        let task = todo[0].clone();
        assert!(store.move_task(&task, ColumnId::Todo, ColumnId::InProgress));
        assert!(store.column(ColumnId::Todo).tasks.is_empty());
        assert_eq!(store.column(ColumnId::InProgress).tasks, vec![task]);

        assert!(store.edit_task(
            &id,
            ColumnId::InProgress,
            "Write report v2",
            String::new(),
            Priority::Low
        ));
        let edited = &store.column(ColumnId::InProgress).tasks[0];
        assert_eq!(edited.id, id);
        assert_eq!(edited.title, "Write report v2");
        assert_eq!(edited.priority, Priority::Low);

        assert!(store.delete_task(&id, ColumnId::InProgress));
        assert!(store.column(ColumnId::InProgress).tasks.is_empty());
        assert_eq!(stored_board(&storage), Board::default());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, String),
        Edit(usize, usize, String),
        Delete(usize, usize),
        Move(usize, usize, usize),
        Drop(usize, usize, usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let title = "[ a-z]{0,6}";
        prop_oneof![
            (0..3usize, title).prop_map(|(c, t)| Op::Add(c, t)),
            (any::<usize>(), 0..3usize, title).prop_map(|(i, c, t)| Op::Edit(i, c, t)),
            (any::<usize>(), 0..3usize).prop_map(|(i, c)| Op::Delete(i, c)),
            (any::<usize>(), 0..3usize, 0..3usize).prop_map(|(i, s, d)| Op::Move(i, s, d)),
            (any::<usize>(), 0..3usize, 0..3usize).prop_map(|(i, s, d)| Op::Drop(i, s, d)),
        ]
    }

    fn pick(store: &BoardStore<MemoryStorage>, index: usize) -> Option<Task> {
        let all: Vec<&Task> = store
            .board()
            .columns()
            .iter()
            .flat_map(|c| c.tasks.iter())
            .collect();
        if all.is_empty() {
            None
        } else {
            Some(all[index % all.len()].clone())
        }
    }

    proptest! {
        #[test]
        fn every_task_lives_in_exactly_one_column(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let lanes = ColumnId::all();
            let (mut store, storage) = open_empty();
            let mut expected: HashSet<String> = HashSet::new();

            for op in ops {
                match op {
                    Op::Add(c, title) => {
                        if let Some(id) = store.add_task(lanes[c], &title, String::new(), Priority::Medium) {
                            expected.insert(id);
                        }
                    }
                    Op::Edit(i, c, title) => {
                        if let Some(task) = pick(&store, i) {
                            store.edit_task(&task.id, lanes[c], &title, String::new(), Priority::High);
                        }
                    }
                    Op::Delete(i, c) => {
                        if let Some(task) = pick(&store, i) {
                            if store.delete_task(&task.id, lanes[c]) {
                                expected.remove(&task.id);
                            }
                        }
                    }
                    Op::Move(i, s, d) => {
                        if let Some(task) = pick(&store, i) {
                            store.move_task(&task, lanes[s], lanes[d]);
                        }
                    }
                    Op::Drop(i, s, d) => {
                        if let Some(task) = pick(&store, i) {
                            store.begin_drag(task, lanes[s]);
                            store.commit_drop(lanes[d]);
                        }
                    }
                }

                let mut seen: HashMap<&str, usize> = HashMap::new();
                for task in store.board().columns().iter().flat_map(|c| c.tasks.iter()) {
                    *seen.entry(task.id.as_str()).or_default() += 1;
                }
                prop_assert!(seen.values().all(|&n| n == 1));
                let present: HashSet<String> = seen.keys().map(|id| id.to_string()).collect();
                prop_assert_eq!(&present, &expected);
                prop_assert!(store.board().check_layout().is_ok());
            }

            if storage.writes() > 0 {
                prop_assert_eq!(&stored_board(&storage), store.board());
            }
        }
    }
}
