//! HTTP server integration: request-scoped logger propagation

pub mod context;
pub mod middleware;

pub use context::{Handler, RequestContext};
pub use middleware::{
    logger_from, named_logger_from, recovery, request_logger, CONTEXT_LOG_KEY,
};
