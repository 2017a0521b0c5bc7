//! Process-wide default logger
//!
//! Exactly one default [`Logger`] is reachable without explicit threading.
//! It is installed by the `init` entry points (last caller wins) and resolved
//! at call time by every package-level convenience operation, so replacing
//! it changes all subsequent calls. Replacement is intended for the serial
//! initialization phase at process start; initialize before any concurrent
//! logging begins.

use crate::core::{Field, JsonEncoder, Level, Logger, Result};
use parking_lot::RwLock;

static DEFAULT: RwLock<Option<Logger>> = RwLock::new(None);

/// Zero-argument flush operation returned by the `init` entry points.
/// Invoke it before process exit for durability guarantees.
pub type SyncFunc = Box<dyn Fn() + Send + Sync>;

/// The current process-wide default, resolved at call time.
///
/// Before any `init` call this lazily installs a fallback logger: JSON
/// encoding to stderr at `Info` threshold with caller capture on.
pub fn default_logger() -> Logger {
    if let Some(logger) = DEFAULT.read().as_ref() {
        return logger.clone();
    }
    let mut guard = DEFAULT.write();
    guard.get_or_insert_with(fallback_logger).clone()
}

/// Install `logger` as the process-wide default, replacing any previous one
pub fn set_default(logger: Logger) {
    *DEFAULT.write() = Some(logger);
}

/// Initialize the default logger with the default directory `"./"`.
///
/// `prefix` names the rotating log file (`./<prefix>.<date>.log`); records
/// mirror to stderr when `mirror_to_console` is set.
pub fn init(prefix: &str, mirror_to_console: bool) -> SyncFunc {
    init_with_level("./", prefix, Level::Info, mirror_to_console)
}

/// Same as [`init`] with an explicit log directory
pub fn init_with_path(dir: &str, prefix: &str, mirror_to_console: bool) -> SyncFunc {
    init_with_level(dir, prefix, Level::Info, mirror_to_console)
}

/// Full initialization entry point with an explicit severity threshold.
///
/// Not safe to call concurrently with in-flight logging; initialization is
/// expected to finish before concurrent use of the convenience operations.
pub fn init_with_level(
    dir: &str,
    prefix: &str,
    level: Level,
    mirror_to_console: bool,
) -> SyncFunc {
    set_default(Logger::new(dir, prefix, level, mirror_to_console));
    Box::new(|| {
        let _ = default_logger().sync();
    })
}

fn fallback_logger() -> Logger {
    Logger::builder()
        .encoder(Box::new(JsonEncoder))
        .with_caller(true)
        .destination(Box::new(std::io::stderr()))
        .build()
}

#[track_caller]
pub fn debug(message: impl Into<String>, fields: &[Field]) {
    default_logger().debug(message, fields);
}

#[track_caller]
pub fn info(message: impl Into<String>, fields: &[Field]) {
    default_logger().info(message, fields);
}

#[track_caller]
pub fn warn(message: impl Into<String>, fields: &[Field]) {
    default_logger().warn(message, fields);
}

#[track_caller]
pub fn error(message: impl Into<String>, fields: &[Field]) {
    default_logger().error(message, fields);
}

#[track_caller]
pub fn dpanic(message: impl Into<String>, fields: &[Field]) {
    default_logger().dpanic(message, fields);
}

#[track_caller]
pub fn panic(message: impl Into<String>, fields: &[Field]) {
    default_logger().panic(message, fields);
}

#[track_caller]
pub fn fatal(message: impl Into<String>, fields: &[Field]) {
    default_logger().fatal(message, fields);
}

/// Flush the current default's destinations
pub fn sync() -> Result<()> {
    default_logger().sync()
}
