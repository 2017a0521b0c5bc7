//! Time-rotating file sink with retention pruning
//!
//! [`RollingWriter`] behaves as a plain byte sink whose backing file changes
//! transparently over time. The active file is `<dir>/<prefix>.<date>.log`;
//! when the local date rolls over (checked at most once per rotation
//! interval) the writer reopens onto the new name and removes sibling files
//! older than the retention age.

use crate::core::error::{LogError, Result};
use chrono::{Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// How often the active filename is recomputed
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(60);

/// How long rotated files are retained
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 3600);

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct RollingWriter {
    dir: PathBuf,
    prefix: String,
    rotation_interval: Duration,
    max_age: Duration,
    writer: BufWriter<File>,
    current_path: PathBuf,
    last_check: SystemTime,
}

impl RollingWriter {
    /// Create a rolling writer with the default rotation interval (one
    /// minute) and retention age (seven days).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the active
    /// file cannot be opened.
    pub fn new(dir: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        Self::with_config(dir, prefix, DEFAULT_ROTATION_INTERVAL, DEFAULT_MAX_AGE)
    }

    /// Create a rolling writer with explicit rotation interval and
    /// retention age.
    pub fn with_config(
        dir: impl AsRef<Path>,
        prefix: &str,
        rotation_interval: Duration,
        max_age: Duration,
    ) -> Result<Self> {
        if prefix.is_empty() {
            return Err(LogError::config("RollingWriter", "empty filename prefix"));
        }

        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            LogError::io_operation(
                "creating log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        let current_path = dir.join(file_name(prefix, Local::now().date_naive()));
        let writer = open_append(&current_path)?;

        let mut rolling = Self {
            dir,
            prefix: prefix.to_string(),
            rotation_interval,
            max_age,
            writer,
            current_path,
            last_check: SystemTime::now(),
        };
        rolling.prune_expired();
        Ok(rolling)
    }

    /// Path of the file currently being written
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// Reopen onto the new date-stamped file if the name changed since the
    /// last check. Failures leave the current file in place; logging must
    /// not stop because rotation did.
    fn rotate_if_due(&mut self) {
        let now = SystemTime::now();
        let elapsed = now
            .duration_since(self.last_check)
            .unwrap_or(Duration::ZERO);
        if elapsed < self.rotation_interval {
            return;
        }
        self.last_check = now;

        let next_path = self.dir.join(file_name(&self.prefix, Local::now().date_naive()));
        if next_path == self.current_path {
            return;
        }

        if let Err(e) = self.writer.flush() {
            eprintln!(
                "[FANLOG WARNING] Flush before rotation failed for {}: {}",
                self.current_path.display(),
                e
            );
        }
        match open_append(&next_path) {
            Ok(writer) => {
                self.writer = writer;
                self.current_path = next_path;
                self.prune_expired();
            }
            Err(e) => eprintln!(
                "[FANLOG WARNING] Rotation to {} failed, keeping current file: {}",
                next_path.display(),
                e
            ),
        }
    }

    /// Remove sibling files whose date stamp is older than the retention
    /// age. Best-effort; failures are diagnostics, never errors.
    fn prune_expired(&self) {
        let retention = chrono::Duration::from_std(self.max_age)
            .unwrap_or_else(|_| chrono::Duration::days(7));
        let cutoff = (Local::now() - retention).date_naive();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(date) = parse_file_date(&self.prefix, name) else {
                continue;
            };

            if date < cutoff {
                if let Err(e) = fs::remove_file(entry.path()) {
                    eprintln!(
                        "[FANLOG WARNING] Failed to remove expired log file {}: {}",
                        entry.path().display(),
                        e
                    );
                }
            }
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.rotate_if_due();
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for RollingWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

fn file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}.{}.log", prefix, date.format(DATE_FORMAT))
}

fn open_append(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LogError::rotation(path.display().to_string(), format!("Failed to open: {}", e))
        })?;
    Ok(BufWriter::new(file))
}

/// Match `<prefix>.<YYYY-MM-DD>.log` and extract the date stamp
fn parse_file_date(prefix: &str, name: &str) -> Option<NaiveDate> {
    let rest = name.strip_prefix(prefix)?.strip_prefix('.')?;
    let stamp = rest.strip_suffix(".log")?;
    NaiveDate::parse_from_str(stamp, DATE_FORMAT).ok()
}
