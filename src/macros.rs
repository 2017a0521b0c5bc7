//! Free-form ("sprintf-style") logging macros
//!
//! Each severity has a formatting macro. With a logger expression as the
//! first argument the record goes through that handle; with a bare format
//! string it goes through the process-wide default, resolved at call time.
//!
//! # Examples
//!
//! ```
//! use fanlog::{infof, Logger};
//!
//! let logger = Logger::builder().destination(Box::new(std::io::stderr())).build();
//!
//! // Through an explicit handle
//! infof!(logger, "listening on port {}", 8080);
//!
//! // Through the process-wide default
//! infof!("listening on port {}", 8080);
//! ```
//!
//! Bound fields of the receiving logger still merge into the record; only
//! the message construction differs from the field-typed surface.

/// Free-form emission at an explicit level
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, format_args!($($arg)+))
    };
}

/// Free-form debug-level emission
#[macro_export]
macro_rules! debugf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::default_logger().logf($crate::Level::Debug, format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::Level::Debug, format_args!($($arg)+))
    };
}

/// Free-form info-level emission
#[macro_export]
macro_rules! infof {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::default_logger().logf($crate::Level::Info, format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::Level::Info, format_args!($($arg)+))
    };
}

/// Free-form warn-level emission
#[macro_export]
macro_rules! warnf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::default_logger().logf($crate::Level::Warn, format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::Level::Warn, format_args!($($arg)+))
    };
}

/// Free-form error-level emission
#[macro_export]
macro_rules! errorf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::default_logger().logf($crate::Level::Error, format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::Level::Error, format_args!($($arg)+))
    };
}

/// Free-form dpanic-level emission
#[macro_export]
macro_rules! dpanicf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::default_logger().logf($crate::Level::DPanic, format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::Level::DPanic, format_args!($($arg)+))
    };
}

/// Free-form panic-level emission; panics after the write
#[macro_export]
macro_rules! panicf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::default_logger().logf($crate::Level::Panic, format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::Level::Panic, format_args!($($arg)+))
    };
}

/// Free-form fatal-level emission; terminates the process after the write
#[macro_export]
macro_rules! fatalf {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::global::default_logger().logf($crate::Level::Fatal, format_args!($fmt $(, $arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::Level::Fatal, format_args!($($arg)+))
    };
}
