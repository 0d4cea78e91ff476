//! Colorized terminal rendering
//!
//! Layout of a terminal line (cells separated by tabs):
//!
//! ```text
//! <time>  |<level  >  |<function padded to 30>  |<location padded to 40>|   <message>
//! ```
//!
//! Each cell gets its own background/foreground color. Cells are padded to
//! a minimum width and never truncated. With `log_func_name` off the function
//! cell is empty but its tab stays, so the remaining columns do not shift.
//!
//! Colors are emitted as 256-color `ESC[48;5;Nm` / `ESC[38;5;Nm` sequences by
//! crossterm. crossterm drops them when the `NO_COLOR` environment variable
//! is set, leaving plain padded text.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{style, Color, Stylize};

use super::level::{BLACK, BLUE, CYAN, GREY, WHITE};
use super::record::LogRecord;
use crate::config::LogConfig;
use crate::error::{LogError, LogResult};

const LEVEL_WIDTH: usize = 7;
const FUNCTION_WIDTH: usize = 30;
const LOCATION_WIDTH: usize = 40;

/// Wrap `text` in one space on each side and color it
fn colored(background: Color, foreground: Color, text: impl Display) -> String {
    style(format!(" {} ", text))
        .on(background)
        .with(foreground)
        .to_string()
}

/// Render the colorized terminal line for a record (no trailing newline)
pub fn render_terminal_line(config: &LogConfig, record: &LogRecord) -> String {
    let time = colored(GREY, BLACK, record.timestamp(&config.time_format));

    let level = format!(
        "|{}",
        colored(
            record.tag.background,
            record.tag.foreground,
            format!("{:<width$}", record.level, width = LEVEL_WIDTH)
        )
    );

    let function = if config.log_func_name {
        format!(
            "|{}",
            colored(
                BLUE,
                WHITE,
                format!("{:<width$}", record.function, width = FUNCTION_WIDTH)
            )
        )
    } else {
        String::new()
    };

    let location = format!(
        "|{}|",
        colored(
            CYAN,
            WHITE,
            format!("{:<width$}", record.location, width = LOCATION_WIDTH)
        )
    );

    format!(
        "{}\t{}\t{}\t{}\t {}",
        time, level, function, location, record.message
    )
}

/// Destination for terminal lines, stdout unless replaced
pub struct Terminal {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal").finish_non_exhaustive()
    }
}

impl Terminal {
    /// Terminal writing to the process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Terminal writing to any sink
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }

    /// Write one line followed by a newline, then flush
    pub fn write_line(&self, line: &str) -> LogResult<()> {
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(sink, "{}", line)
            .and_then(|_| sink.flush())
            .map_err(LogError::Terminal)
    }
}

/// In-memory sink whose contents stay readable after being handed to a `Terminal`
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{Caller, Level};
    use chrono::{TimeZone, Utc};

    fn record(config: &LogConfig) -> LogRecord {
        let caller = Caller::new("app::server::handle", "src/server.rs", 12);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 1, 2, 3).unwrap();
        LogRecord::new(config, Level::Info, &caller, "hello world", now)
    }

    #[test]
    fn test_terminal_line_fields() {
        let config = LogConfig::default();
        let line = render_terminal_line(&config, &record(&config));

        assert!(line.contains(" 2024-03-01T08:02:03+0700 "));
        assert!(line.contains(" INFO    "));
        assert!(line.contains(&format!(" {:<30} ", "server::handle")));
        assert!(line.contains(&format!(" {:<40} ", "server.rs:12")));
        assert!(line.ends_with("\t hello world"));
        assert_eq!(line.matches('\t').count(), 4);
    }

    #[test]
    fn test_terminal_line_without_function() {
        let mut config = LogConfig::default();
        config.log_func_name = false;
        let line = render_terminal_line(&config, &record(&config));

        assert!(!line.contains("server::handle"));
        assert!(line.contains("server.rs:12"));
        // Empty function cell keeps its separator
        assert!(line.contains("\t\t"));
    }

    #[test]
    fn test_long_fields_are_not_truncated() {
        let config = LogConfig::default();
        let mut rec = record(&config);
        rec.location = "x".repeat(60);
        let line = render_terminal_line(&config, &rec);
        assert!(line.contains(&"x".repeat(60)));
    }

    /// Expected escape sequence for a cell colored `background`/`foreground`
    fn cell(background: u8, foreground: u8, text: &str) -> String {
        format!("\x1b[48;5;{}m\x1b[38;5;{}m {} ", background, foreground, text)
    }

    #[test]
    fn test_level_cells_use_level_colors() {
        crossterm::style::force_color_output(true);
        let config = LogConfig::default();

        for (level, background, foreground) in [
            (Level::Info, 2, 231),
            (Level::Warning, 3, 0),
            (Level::Error, 1, 231),
        ] {
            let mut rec = record(&config);
            rec.level = level;
            rec.tag = level.tag();
            let line = render_terminal_line(&config, &rec);

            let expected = cell(background, foreground, &format!("{:<7}", level.as_str()));
            assert!(line.contains(&expected), "{:?} missing {:?}", line, expected);
        }
    }

    #[test]
    fn test_column_cells_use_fixed_colors() {
        crossterm::style::force_color_output(true);
        let config = LogConfig::default();
        let line = render_terminal_line(&config, &record(&config));

        assert!(line.starts_with(&cell(7, 0, "2024-03-01T08:02:03+0700")));
        let function = cell(4, 231, &format!("{:<30}", "server::handle"));
        let location = cell(6, 231, &format!("{:<40}", "server.rs:12"));
        assert!(line.contains(&format!("|{}", function)));
        assert!(line.contains(&format!("|{}", location)));
        assert!(line.contains("\x1b[49m\x1b[39m|\t hello world"));
    }

    #[test]
    fn test_terminal_write_line() {
        let buffer = SharedBuffer::default();
        let terminal = Terminal::new(buffer.clone());

        terminal.write_line("first").unwrap();
        terminal.write_line("second").unwrap();

        assert_eq!(buffer.contents(), "first\nsecond\n");
    }
}
