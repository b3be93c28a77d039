pub mod column;
pub mod header;
pub mod task_card;
pub mod task_form;

pub use column::KanbanColumn;
pub use header::KanbanHeader;
