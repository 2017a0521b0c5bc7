//! # fanlog
//!
//! A structured-logging facade with two call surfaces (field-typed and
//! free-form), a rotating multi-destination sink fan-out, a replaceable
//! process-wide default and request-scoped logger propagation for an HTTP
//! server layer.
//!
//! ## Features
//!
//! - **Two encoders**: human-readable console lines in development,
//!   one JSON object per line in production, selected from `APP_ENV`
//! - **Sink fan-out**: every record reaches every destination, best-effort
//! - **Rotating files**: date-stamped files with retention pruning
//! - **Request scoping**: middleware derives, stashes and retrieves a
//!   per-request child logger and absorbs handler panics
//!
//! ## Quick start
//!
//! ```no_run
//! use fanlog::{global, Field};
//!
//! let flush = global::init("app", true);
//! global::info("server started", &[Field::int("port", 8080)]);
//! flush();
//! ```

pub mod core;
pub mod global;
pub mod http;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ConsoleEncoder, Encoder, EnvMode, Field, FieldValue, JsonEncoder, Level, LogError,
        Logger, LoggerBuilder, Record, Result,
    };
    pub use crate::global::{init, init_with_level, init_with_path, set_default, SyncFunc};
    pub use crate::http::{logger_from, named_logger_from, recovery, request_logger};
    pub use crate::sinks::RollingWriter;
}

pub use crate::core::{
    Caller, ConsoleEncoder, Encoder, EnvMode, Fanout, Field, FieldValue, JsonEncoder, Level,
    LogError, Logger, LoggerBuilder, Record, Result,
};
pub use global::{init, init_with_level, init_with_path, set_default, SyncFunc};
pub use http::{Handler, RequestContext};
pub use sinks::RollingWriter;
