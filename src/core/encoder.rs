//! Record encoding strategies
//!
//! Two strategies exist: a human-oriented console layout for development and
//! a one-JSON-object-per-line layout for production. The strategy is selected
//! from a deployment-mode signal (the `APP_ENV` environment variable); any
//! unrecognized mode falls back to production.

use super::error::Result;
use super::record::{Record, TIME_FORMAT};

/// Environment variable carrying the deployment-mode signal
pub const ENV_VAR: &str = "APP_ENV";

/// Token that selects development mode; anything else means production
pub const DEV_ENV: &str = "dev";

/// Deployment mode controlling the encoding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvMode {
    Development,
    #[default]
    Production,
}

impl EnvMode {
    /// Read the deployment mode from the process environment.
    ///
    /// Only the exact token `"dev"` selects development; absence or any
    /// other value selects production.
    pub fn from_env() -> Self {
        match std::env::var(ENV_VAR) {
            Ok(v) if v == DEV_ENV => EnvMode::Development,
            _ => EnvMode::Production,
        }
    }

    /// Select the encoding strategy for this mode. Total over both modes.
    pub fn encoder(&self) -> Box<dyn Encoder> {
        match self {
            EnvMode::Development => Box::new(ConsoleEncoder),
            EnvMode::Production => Box::new(JsonEncoder),
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, EnvMode::Development)
    }
}

/// Turns one record into the bytes written to every destination
pub trait Encoder: Send + Sync {
    fn encode(&self, record: &Record) -> Result<Vec<u8>>;
    fn name(&self) -> &str;
}

/// Human-oriented line encoder for development:
/// `[time] [LEVEL] caller message key=value key=value`
pub struct ConsoleEncoder;

impl Encoder for ConsoleEncoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let mut line = format!(
            "[{}] [{}]",
            record.time.format(TIME_FORMAT),
            record.level.capital_str()
        );

        if let Some(caller) = record.caller {
            line.push(' ');
            line.push_str(&caller.full());
        }

        line.push(' ');
        line.push_str(&record.message);

        // Duplicate keys are preserved in emission order
        for field in &record.fields {
            line.push(' ');
            line.push_str(&field.key);
            line.push('=');
            line.push_str(&field.value.to_string());
        }

        line.push('\n');
        Ok(line.into_bytes())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Machine-oriented encoder for production: one JSON object per line with
/// fixed keys `time`, `level`, `caller` (short form, only when captured) and
/// `msg`, then every field merged at the top level. Colliding field keys
/// deduplicate with last-writer-wins.
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let mut object = serde_json::Map::new();

        object.insert(
            "time".to_string(),
            serde_json::Value::String(record.time.format(TIME_FORMAT).to_string()),
        );
        object.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.lowercase_str().to_string()),
        );
        if let Some(caller) = record.caller {
            object.insert("caller".to_string(), serde_json::Value::String(caller.short()));
        }
        object.insert(
            "msg".to_string(),
            serde_json::Value::String(record.message.clone()),
        );

        for field in &record.fields {
            object.insert(field.key.clone(), field.value.to_json_value());
        }

        let mut bytes = serde_json::to_vec(&object)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "json"
    }
}
