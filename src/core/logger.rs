//! Logger core
//!
//! A [`Logger`] is a cheap-to-clone handle binding an encoder, a sink
//! fan-out, a severity threshold and a set of bound fields that merge into
//! every record it emits. All handles derived from one logger share the same
//! encoder and fan-out, so emission from any number of threads serializes
//! through one lock and lines never interleave.

use super::encoder::{Encoder, EnvMode, JsonEncoder};
use super::error::Result;
use super::fanout::Fanout;
use super::field::Field;
use super::level::Level;
use super::record::{Caller, Record};
use crate::sinks::rotating::RollingWriter;
use parking_lot::Mutex;
use std::io::Write;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

struct Shared {
    encoder: Box<dyn Encoder>,
    fanout: Mutex<Fanout>,
    threshold: Level,
    development: bool,
    capture_caller: bool,
}

#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    bound: Vec<Field>,
}

impl Logger {
    /// Production constructor: rotating file destination under `dir` named
    /// after `prefix`, mirrored to stderr when `mirror_to_console` is set.
    ///
    /// The encoding strategy and caller capture follow the deployment-mode
    /// signal (`APP_ENV`). A rotating destination that fails to construct is
    /// omitted with a diagnostic; logging continues on the remaining
    /// destinations.
    pub fn new(
        dir: impl AsRef<Path>,
        prefix: &str,
        threshold: Level,
        mirror_to_console: bool,
    ) -> Self {
        let mode = EnvMode::from_env();
        let mut builder = Logger::builder()
            .threshold(threshold)
            .development(mode.is_development())
            .with_caller(mode.is_development())
            .encoder(mode.encoder());

        match RollingWriter::new(dir.as_ref(), prefix) {
            Ok(writer) => builder = builder.destination(Box::new(writer)),
            Err(e) => eprintln!("[FANLOG WARNING] Rotating destination omitted: {}", e),
        }
        if mirror_to_console {
            builder = builder.destination(Box::new(std::io::stderr()));
        }

        builder.build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Emit one record. The single primitive behind both call surfaces.
    ///
    /// Threshold filtering happens before the record is built, but callers
    /// have already evaluated their field arguments, so filtering only saves
    /// encoding and IO cost. `Panic`, `Fatal` and development-mode `DPanic`
    /// escalate after the write even when the record itself was filtered.
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>, fields: &[Field]) {
        let message = message.into();

        if level >= self.shared.threshold {
            let mut record = Record::new(level, &message, &self.bound, fields);
            if self.shared.capture_caller {
                let location = Location::caller();
                record = record.with_caller(Caller {
                    file: location.file(),
                    line: location.line(),
                });
            }
            self.write(&record);
        }

        self.escalate(level, &message);
    }

    /// Free-form emission: the message is formatted from the arguments, the
    /// bound fields still merge in. Prefer the `infof!`-family macros.
    #[track_caller]
    pub fn logf(&self, level: Level, args: std::fmt::Arguments<'_>) {
        match args.as_str() {
            Some(s) => self.log(level, s, &[]),
            None => self.log(level, args.to_string(), &[]),
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Warn, message, fields);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }

    /// Logs at `DPanic` severity; panics after the write only in development mode
    #[track_caller]
    pub fn dpanic(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::DPanic, message, fields);
    }

    /// Logs the message, then panics
    #[track_caller]
    pub fn panic(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Panic, message, fields);
    }

    /// Logs the message, then terminates the process with exit code 1
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Fatal, message, fields);
    }

    /// Derive a handle with additional bound fields.
    ///
    /// The child shares the parent's encoder and fan-out; its bound fields
    /// are the parent's fields followed by `fields`. The parent is never
    /// mutated and nothing is written.
    #[must_use]
    pub fn with_fields(&self, fields: &[Field]) -> Logger {
        let mut bound = self.bound.clone();
        bound.extend_from_slice(fields);
        Logger {
            shared: Arc::clone(&self.shared),
            bound,
        }
    }

    /// Flush buffered bytes in every destination.
    ///
    /// Call once at orderly shutdown; may block until the OS acknowledges
    /// the writes. The first destination error is surfaced.
    pub fn sync(&self) -> Result<()> {
        self.shared.fanout.lock().flush()
    }

    /// Bound fields carried by this handle
    pub fn bound_fields(&self) -> &[Field] {
        &self.bound
    }

    fn write(&self, record: &Record) {
        match self.shared.encoder.encode(record) {
            Ok(bytes) => {
                if let Err(e) = self.shared.fanout.lock().write_record(&bytes) {
                    eprintln!("[FANLOG ERROR] Write failed: {}", e);
                }
            }
            Err(e) => eprintln!("[FANLOG ERROR] Encode failed: {}", e),
        }
    }

    fn escalate(&self, level: Level, message: &str) {
        match level {
            Level::DPanic if self.shared.development => {
                let _ = self.sync();
                panic!("{}", message);
            }
            Level::Panic => {
                let _ = self.sync();
                panic!("{}", message);
            }
            Level::Fatal => {
                let _ = self.sync();
                std::process::exit(1);
            }
            _ => {}
        }
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use fanlog::{Level, Logger};
///
/// let logger = Logger::builder()
///     .threshold(Level::Debug)
///     .destination(Box::new(std::io::stderr()))
///     .build();
/// logger.debug("ready", &[]);
/// ```
pub struct LoggerBuilder {
    threshold: Level,
    development: bool,
    capture_caller: bool,
    encoder: Option<Box<dyn Encoder>>,
    destinations: Vec<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            threshold: Level::Info,
            development: false,
            capture_caller: false,
            encoder: None,
            destinations: Vec::new(),
        }
    }

    /// Minimum severity emitted
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: Level) -> Self {
        self.threshold = level;
        self
    }

    /// Development mode makes `DPanic` escalate like `Panic`
    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Capture call-site attribution. Off by default; the production
    /// constructor enables it only in development mode.
    #[must_use = "builder methods return a new value"]
    pub fn with_caller(mut self, capture: bool) -> Self {
        self.capture_caller = capture;
        self
    }

    /// Encoding strategy; defaults to the production JSON encoder
    #[must_use = "builder methods return a new value"]
    pub fn encoder(mut self, encoder: Box<dyn Encoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Register one destination; records fan out to all of them in order
    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Box<dyn Write + Send>) -> Self {
        self.destinations.push(destination);
        self
    }

    pub fn build(self) -> Logger {
        let mut fanout = Fanout::new();
        for destination in self.destinations {
            fanout.add(destination);
        }

        Logger {
            shared: Arc::new(Shared {
                encoder: self.encoder.unwrap_or_else(|| Box::new(JsonEncoder)),
                fanout: Mutex::new(fanout),
                threshold: self.threshold,
                development: self.development,
                capture_caller: self.capture_caller,
            }),
            bound: Vec::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc as StdArc;

    #[derive(Clone, Default)]
    struct Buffer(StdArc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().clone())
                .unwrap()
                .lines()
                .map(String::from)
                .collect()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn buffered_logger(threshold: Level) -> (Logger, Buffer) {
        let buffer = Buffer::default();
        let logger = Logger::builder()
            .threshold(threshold)
            .destination(Box::new(buffer.clone()))
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_threshold_filters_below() {
        let (logger, buffer) = buffered_logger(Level::Info);

        logger.debug("invisible", &[]);
        assert!(buffer.lines().is_empty());

        logger.info("visible", &[]);
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_bound_fields_merge_into_every_record() {
        let (logger, buffer) = buffered_logger(Level::Info);
        let child = logger.with_fields(&[Field::string("path", "/foo")]);

        child.info("hit", &[Field::string("name", "test")]);

        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(parsed["path"], "/foo");
        assert_eq!(parsed["name"], "test");
    }

    #[test]
    fn test_derivation_does_not_mutate_parent() {
        let (logger, buffer) = buffered_logger(Level::Info);
        let child = logger.with_fields(&[Field::string("extra", "1")]);
        let grandchild = child.with_fields(&[Field::string("more", "2")]);

        logger.info("base", &[]);
        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert!(parsed.get("extra").is_none());

        assert_eq!(logger.bound_fields().len(), 0);
        assert_eq!(child.bound_fields().len(), 1);
        assert_eq!(grandchild.bound_fields().len(), 2);
    }

    #[test]
    fn test_logf_merges_bound_fields() {
        let (logger, buffer) = buffered_logger(Level::Info);
        let child = logger.with_fields(&[Field::string("path", "/foo")]);

        child.logf(Level::Info, format_args!("count={}", 3));

        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(parsed["msg"], "count=3");
        assert_eq!(parsed["path"], "/foo");
    }

    #[test]
    fn test_panic_level_emits_then_panics() {
        let (logger, buffer) = buffered_logger(Level::Info);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("boom", &[]);
        }));

        assert!(result.is_err());
        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(parsed["level"], "panic");
        assert_eq!(parsed["msg"], "boom");
    }

    #[test]
    fn test_dpanic_is_error_outside_development() {
        let (logger, buffer) = buffered_logger(Level::Info);

        logger.dpanic("suspicious", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(parsed["level"], "dpanic");
    }

    #[test]
    fn test_dpanic_escalates_in_development() {
        let buffer = Buffer::default();
        let logger = Logger::builder()
            .development(true)
            .destination(Box::new(buffer.clone()))
            .build();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.dpanic("suspicious", &[]);
        }));

        assert!(result.is_err());
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_panic_escalates_even_when_filtered() {
        let (logger, buffer) = buffered_logger(Level::Fatal);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("boom", &[]);
        }));

        assert!(result.is_err());
        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn test_caller_captured_when_enabled() {
        let buffer = Buffer::default();
        let logger = Logger::builder()
            .with_caller(true)
            .destination(Box::new(buffer.clone()))
            .build();

        logger.info("here", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        let caller = parsed["caller"].as_str().unwrap();
        assert!(caller.starts_with("logger.rs:"), "caller was {}", caller);
    }
}
