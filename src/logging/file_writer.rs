//! Plain-text rendering of records into the day's log file

use std::path::{Path, PathBuf};

use super::fs_util;
use super::record::LogRecord;
use crate::config::LogConfig;
use crate::error::LogResult;

/// Path of the log file for `day` (formatted `YYYY-MM-DD`)
pub fn day_log_path(logs_dir: &Path, day: &str) -> PathBuf {
    logs_dir.join(format!("{}.log", day))
}

/// Render `[<time>][<LEVEL>][<function>][<location>] <message>`
///
/// The function segment is left out when `log_func_name` is off.
pub fn render_file_line(config: &LogConfig, record: &LogRecord) -> String {
    let function = if config.log_func_name {
        format!("[{}]", record.function)
    } else {
        String::new()
    };

    format!(
        "[{}][{}]{}[{}] {}",
        record.timestamp(&config.time_format),
        record.level.as_str(),
        function,
        record.location,
        record.message
    )
}

/// Append the record to `<path>/<day>.log`
///
/// Returns the path that was written.
pub fn write_record(config: &LogConfig, record: &LogRecord) -> LogResult<PathBuf> {
    let path = day_log_path(&config.expanded_path(), &record.day());
    let mut line = render_file_line(config, record);
    line.push('\n');

    fs_util::append_to_file(&path, &line)?;
    Ok(path)
}
