//! View rendering modules

mod console;

pub use console::{render_console, session_summary, speed_ratio};
