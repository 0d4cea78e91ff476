//! The logger: builds records and hands them to the file and terminal sinks

use std::io::Write;
use std::panic::Location;

use chrono::Utc;
use serde::Serialize;

use super::caller::Caller;
use super::file_writer;
use super::level::Level;
use super::record::LogRecord;
use super::terminal::{self, Terminal};
use crate::config::LogConfig;
use crate::error::{LogError, LogResult};

/// Leveled console and day-file logger
///
/// The configuration is read at every call, so changes made through
/// [`Logger::config_mut`] apply to the next record. The file permission cycle
/// is not atomic: one process per log directory.
#[derive(Debug, Default)]
pub struct Logger {
    config: LogConfig,
    terminal: Terminal,
}

impl Logger {
    /// Create a logger printing to stdout
    pub fn new(config: LogConfig) -> Self {
        Self {
            config,
            terminal: Terminal::stdout(),
        }
    }

    /// Create a logger printing terminal lines to `writer`
    pub fn with_terminal(config: LogConfig, writer: impl Write + Send + 'static) -> Self {
        Self {
            config,
            terminal: Terminal::new(writer),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut LogConfig {
        &mut self.config
    }

    /// Emit a record for `caller`
    ///
    /// Both sinks are always attempted; the first failure is returned after
    /// being reported through `tracing`.
    pub fn log(&self, level: Level, caller: Caller, message: &str) -> LogResult<()> {
        let record = LogRecord::new(&self.config, level, &caller, message, Utc::now());
        self.emit(&record)
    }

    /// Emit an INFO record attributed to the calling location
    ///
    /// Only the file and line are known here, so the function is written as
    /// `unknown`. Use [`log_info!`](crate::log_info) to record the function name.
    #[track_caller]
    pub fn info(&self, message: &str) -> LogResult<()> {
        self.log(Level::Info, Caller::from_location(Location::caller()), message)
    }

    /// Emit a WARNING record attributed to the calling location
    ///
    /// Only the file and line are known here, so the function is written as
    /// `unknown`. Use [`log_warning!`](crate::log_warning) to record the function name.
    #[track_caller]
    pub fn warning(&self, message: &str) -> LogResult<()> {
        self.log(
            Level::Warning,
            Caller::from_location(Location::caller()),
            message,
        )
    }

    /// Emit an ERROR record attributed to the calling location
    ///
    /// Only the file and line are known here, so the function is written as
    /// `unknown`. Use [`log_error!`](crate::log_error) to record the function name.
    #[track_caller]
    pub fn error(&self, message: &str) -> LogResult<()> {
        self.log(Level::Error, Caller::from_location(Location::caller()), message)
    }

    /// Emit `value` as indented JSON under `title` at INFO level
    ///
    /// If `value` cannot be serialized the error text is emitted at ERROR
    /// level instead and the serialization error is returned. The function is
    /// written as `unknown`; [`log_json!`](crate::log_json) records it.
    #[track_caller]
    pub fn emit_json<T: Serialize + ?Sized>(&self, title: &str, value: &T) -> LogResult<()> {
        self.log_json(Caller::from_location(Location::caller()), title, value)
    }

    /// [`Logger::emit_json`] with an explicit caller
    pub fn log_json<T: Serialize + ?Sized>(
        &self,
        caller: Caller,
        title: &str,
        value: &T,
    ) -> LogResult<()> {
        match to_indented_json(value) {
            Ok(json) => self.log(Level::Info, caller, &format!("{}:\n{}", title, json)),
            Err(source) => {
                let err = LogError::Serialize {
                    title: title.to_string(),
                    source,
                };
                // the serialization error takes precedence over a sink failure
                let _ = self.log(Level::Error, caller, &err.to_string());
                Err(err)
            }
        }
    }

    /// Render a record to every enabled sink
    pub fn emit(&self, record: &LogRecord) -> LogResult<()> {
        let file_result = if self.config.create_log_file {
            file_writer::write_record(&self.config, record).map(|_| ())
        } else {
            Ok(())
        };
        if let Err(e) = &file_result {
            tracing::warn!("Log file write failed: {}", e);
        }

        let terminal_result = if self.config.debug_mode {
            self.terminal
                .write_line(&terminal::render_terminal_line(&self.config, record))
        } else {
            Ok(())
        };
        if let Err(e) = &terminal_result {
            tracing::warn!("Terminal write failed: {}", e);
        }

        file_result.and(terminal_result)
    }
}

/// Serialize with a four-space indent, continuation lines prefixed by one space
fn to_indented_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    let json = String::from_utf8_lossy(&buf);
    Ok(json.lines().collect::<Vec<_>>().join("\n "))
}

/// Log an INFO record with `format!` arguments, naming the enclosing function
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logging::Level::Info, $crate::caller!(), &format!($($arg)*))
    };
}

/// Log a WARNING record with `format!` arguments, naming the enclosing function
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logging::Level::Warning, $crate::caller!(), &format!($($arg)*))
    };
}

/// Log an ERROR record with `format!` arguments, naming the enclosing function
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logging::Level::Error, $crate::caller!(), &format!($($arg)*))
    };
}

/// Log a value as indented JSON, naming the enclosing function
#[macro_export]
macro_rules! log_json {
    ($logger:expr, $title:expr, $value:expr) => {
        $logger.log_json($crate::caller!(), $title, $value)
    };
}
