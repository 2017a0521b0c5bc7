//! Immutable log record snapshots

use super::field::Field;
use super::level::Level;
use chrono::{DateTime, Local};

/// Timestamp format shared by both encoders and the time-valued fields
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Call-site attribution captured at emission time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    /// Full `path/to/file.rs:line` form, used by the development encoder
    pub fn full(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }

    /// Short `file.rs:line` form, used by the production encoder
    pub fn short(&self) -> String {
        let base = self
            .file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file);
        format!("{}:{}", base, self.line)
    }
}

/// One log event, produced at emission time and consumed synchronously by
/// the sink fan-out. Only the encoded bytes outlive it.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub fields: Vec<Field>,
    pub caller: Option<Caller>,
}

impl Record {
    /// Build a record, merging bound fields ahead of call-site fields.
    ///
    /// The message is sanitized so one record always occupies one line in
    /// every destination, which also prevents log injection.
    pub fn new(level: Level, message: &str, bound: &[Field], fields: &[Field]) -> Self {
        let mut merged = Vec::with_capacity(bound.len() + fields.len());
        merged.extend_from_slice(bound);
        merged.extend_from_slice(fields);

        Self {
            time: Local::now(),
            level,
            message: sanitize_message(message),
            fields: merged,
            caller: None,
        }
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }
}

fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_merge_order() {
        let bound = [Field::string("path", "/foo")];
        let called = [Field::string("name", "handler")];
        let record = Record::new(Level::Info, "hit", &bound, &called);

        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields[0].key, "path");
        assert_eq!(record.fields[1].key, "name");
    }

    #[test]
    fn test_message_sanitized() {
        let record = Record::new(Level::Info, "a\nb\tc", &[], &[]);
        assert_eq!(record.message, "a\\nb\\tc");
    }

    #[test]
    fn test_caller_forms() {
        let caller = Caller {
            file: "src/http/middleware.rs",
            line: 42,
        };
        assert_eq!(caller.full(), "src/http/middleware.rs:42");
        assert_eq!(caller.short(), "middleware.rs:42");
    }
}
