//! TUI widgets: header, history, input, status.

mod header;
mod history;
mod input;
mod status;

pub use header::render as render_header;
pub use history::{max_scroll as history_max_scroll, render as render_history};
pub use input::render as render_input;
pub use status::render as render_status;
