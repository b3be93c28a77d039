pub mod board_store;
pub mod drag;

pub use board_store::BoardStore;
