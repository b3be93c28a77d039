pub mod manage_tasks;

pub use manage_tasks::ManageTasks;
