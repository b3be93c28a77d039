pub mod use_board;
pub mod use_board_ui;

pub use use_board::*;
pub use use_board_ui::*;
