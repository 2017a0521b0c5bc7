//! Core logger types and traits

pub mod encoder;
pub mod error;
pub mod fanout;
pub mod field;
pub mod level;
pub mod logger;
pub mod record;

pub use encoder::{ConsoleEncoder, Encoder, EnvMode, JsonEncoder};
pub use error::{LogError, Result};
pub use fanout::Fanout;
pub use field::{Field, FieldValue};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use record::{Caller, Record};
