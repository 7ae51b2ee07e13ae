//! Diagnostic logging for flightlog
//!
//! Provides file-based tracing output with timestamped filenames and age-based retention.
//! These are the application's own diagnostics, not flight logs.

mod file_writer;
mod retention;

pub use file_writer::{init_file_logging, LogFileInfo, LoggingGuard};
pub use retention::{cleanup_old_logs, DEFAULT_RETENTION_DAYS};
