//! Leveled logging to the terminal and to date-stamped files
//!
//! Every call produces a [`LogRecord`] that is rendered twice: a colorized
//! line on the terminal and a plain bracketed line appended to
//! `<path>/<YYYY-MM-DD>.log`.

pub mod caller;
mod file_writer;
pub mod fs_util;
mod level;
mod logger;
pub mod record;
mod terminal;

pub use caller::{keep_last_segments, Caller};
pub use file_writer::{day_log_path, render_file_line, write_record};
pub use level::{Level, Tag};
pub use logger::Logger;
pub use record::LogRecord;
pub use terminal::{render_terminal_line, Terminal};
