//! daylog - leveled console and day-file logger
//!
//! Records carry the caller's function and `file:line`, print as colored
//! columns on the terminal and are appended to `<dir>/<YYYY-MM-DD>.log`,
//! which is kept read-only between writes.
//!
//! ```rust,ignore
//! use daylog::{log_info, LogConfig, Logger};
//!
//! let logger = Logger::new(LogConfig::default());
//! log_info!(logger, "listening on {}", addr)?;
//! logger.emit_json("config", logger.config())?;
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::LogConfig;
pub use error::{LogError, LogResult};
pub use logging::{Caller, Level, LogRecord, Logger};
