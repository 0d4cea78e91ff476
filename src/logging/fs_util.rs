//! Filesystem helpers for the day log files
//!
//! Log files stay read-only (0444) between writes. Each append opens a short
//! write window (0222) and closes it again, whether or not the write succeeded.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{LogError, LogResult};

/// Mode applied while a log file is being appended to
pub const WRITABLE_MODE: u32 = 0o222;
/// Mode a log file is left in between writes
pub const READ_ONLY_MODE: u32 = 0o444;
/// Mode a new log file is created with
pub const CREATE_MODE: u32 = 0o600;

/// Check whether a file or directory exists
pub fn path_exists(path: &Path) -> bool {
    path.exists()
}

/// Create `dir` and all missing parents
pub fn ensure_dir(dir: &Path) -> LogResult<()> {
    if dir.as_os_str().is_empty() || path_exists(dir) {
        return Ok(());
    }
    tracing::debug!("Creating log directory: {}", dir.display());
    fs::create_dir_all(dir).map_err(|e| LogError::create_dir(dir, e))
}

/// Open the write window on an existing log file
pub fn set_writable(path: &Path) -> LogResult<()> {
    set_mode(path, WRITABLE_MODE)
}

/// Close the write window on a log file
pub fn set_read_only(path: &Path) -> LogResult<()> {
    set_mode(path, READ_ONLY_MODE)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> LogResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| LogError::permissions(path, mode, e))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> LogResult<()> {
    let mut permissions = fs::metadata(path)
        .map_err(|e| LogError::permissions(path, mode, e))?
        .permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions).map_err(|e| LogError::permissions(path, mode, e))
}

/// Append `content` to `path`, creating the file (and its directory) if needed
///
/// The file is left read-only afterwards, even when the open or the write
/// failed. The first error encountered is returned.
pub fn append_to_file(path: &Path, content: &str) -> LogResult<()> {
    let prepared = if path_exists(path) {
        set_writable(path)
    } else {
        path.parent().map_or(Ok(()), ensure_dir)
    };

    let written = write_content(path, content);
    let restored = if path_exists(path) {
        set_read_only(path)
    } else {
        Ok(())
    };

    prepared.and(written).and(restored)
}

fn write_content(path: &Path, content: &str) -> LogResult<()> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(CREATE_MODE);
    }

    let mut file = options.open(path).map_err(|e| LogError::open(path, e))?;
    // the handle is dropped (closed) on both paths
    file.write_all(content.as_bytes())
        .map_err(|e| LogError::write(path, e))
}
