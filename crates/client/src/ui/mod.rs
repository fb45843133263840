pub mod board;
pub mod hints;
pub mod log_panel;
pub mod terminal;
