//! flightlog - Terminal console controlling flight-data logging sessions
//!
//! The core is the [`control`] state machine deciding when a logging session is open,
//! driven by user commands and speed-threshold crossings. Around it sit the host pieces:
//! threshold edge detection, a session journal, configuration, diagnostic logging and the
//! terminal UI.

pub mod app;
pub mod config;
pub mod control;
pub mod input;
pub mod journal;
pub mod logging;
pub mod threshold;
pub mod tui;
