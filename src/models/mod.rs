pub mod board;
pub mod task;

// Board layout and task types shared by the store and the kanban views
pub use board::{Board, Column, ColumnId};
pub use task::{is_valid_title, Priority, Task};
