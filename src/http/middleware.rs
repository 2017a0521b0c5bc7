//! Request-scoped logger propagation and panic recovery
//!
//! `request_logger()` derives a child of the process-wide default carrying
//! the request's start time and path, stashes it in the request context
//! under [`CONTEXT_LOG_KEY`], and emits one summary record when the
//! downstream chain completes. Handlers retrieve the child with
//! [`logger_from`] or [`named_logger_from`].
//!
//! `recovery(stack)` absorbs handler panics: it converts them into one
//! Error record (request dump, panic payload, optional stack trace) and a
//! 500 response. A panic never propagates past it.

use super::context::{Handler, RequestContext};
use crate::core::record::TIME_FORMAT;
use crate::core::{Field, Logger};
use crate::global;
use chrono::Local;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Well-known context-store key holding the request-scoped logger
pub const CONTEXT_LOG_KEY: &str = "__context_log_key__";

const START_KEY: &str = "start";
const END_KEY: &str = "end";
const DURATION_KEY: &str = "duration";
const STATUS_KEY: &str = "status";
const QUERY_KEY: &str = "query";
const CLIENT_IP_KEY: &str = "ip";
const USER_AGENT_KEY: &str = "user-agent";
const PATH_KEY: &str = "path";
const NAME_KEY: &str = "name";

/// Middleware installing the request-scoped child logger and emitting the
/// per-request summary record.
///
/// On completion without recorded errors the summary is one Info record
/// with message `"<METHOD> <path>"` and the status, timing and client
/// metadata fields. With recorded errors it is one Error record per error.
/// Both go through the request's child logger, which carries the request
/// fields.
pub fn request_logger() -> Handler {
    Arc::new(|ctx: &mut RequestContext| {
        let start = Local::now();
        let path = ctx.path().to_string();
        let started = start.format(TIME_FORMAT).to_string();

        let child = global::default_logger().with_fields(&[
            Field::string(START_KEY, started.clone()),
            Field::string(PATH_KEY, path.clone()),
        ]);
        ctx.set(CONTEXT_LOG_KEY, child);

        ctx.next();

        let end = Local::now();
        let latency = (end - start).to_std().unwrap_or_default();
        let logger = logger_from(ctx);

        if ctx.errors().is_empty() {
            logger.info(
                format!("{} {}", ctx.method(), path),
                &[
                    Field::int(STATUS_KEY, i32::from(ctx.status())),
                    Field::string(START_KEY, started),
                    Field::string(END_KEY, end.format(TIME_FORMAT).to_string()),
                    Field::duration(DURATION_KEY, latency),
                    Field::string(QUERY_KEY, ctx.raw_query()),
                    Field::string(CLIENT_IP_KEY, ctx.client_ip()),
                    Field::string(USER_AGENT_KEY, ctx.user_agent()),
                ],
            );
        } else {
            for error in ctx.errors() {
                logger.error(error.as_str(), &[]);
            }
        }
    })
}

/// The request-scoped logger stored in `ctx`.
///
/// A missing or wrong-typed entry falls back to a fresh derivation of the
/// current process-wide default with no bound fields. Never fails, never
/// panics.
pub fn logger_from(ctx: &RequestContext) -> Logger {
    match ctx.get::<Logger>(CONTEXT_LOG_KEY) {
        Some(logger) => logger.clone(),
        None => global::default_logger().with_fields(&[]),
    }
}

/// Same as [`logger_from`] plus one bound `name` field. The named child is
/// re-stored under the same key, so later retrievals in this request see
/// the name too.
pub fn named_logger_from(ctx: &mut RequestContext, name: &str) -> Logger {
    let logger = logger_from(ctx).with_fields(&[Field::string(NAME_KEY, name)]);
    ctx.set(CONTEXT_LOG_KEY, logger.clone());
    logger
}

/// Panic-recovery middleware, composable with [`request_logger`].
///
/// A panic caused by a broken or reset client connection is reported and
/// the context marked aborted without writing a status; every other panic
/// produces one Error record with the request dump and the panic payload
/// (plus a captured stack trace when `stack` is set) and a 500 status.
pub fn recovery(stack: bool) -> Handler {
    Arc::new(move |ctx: &mut RequestContext| {
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| ctx.next()));

        let Err(payload) = outcome else { return };
        let message = panic_message(payload.as_ref());
        let dump = request_dump(ctx);
        let logger = logger_from(ctx);

        if is_broken_connection(&message) {
            // The client is gone; nothing can be written back
            logger.error(
                ctx.path(),
                &[
                    Field::string("error", message),
                    Field::string("request", dump),
                ],
            );
            ctx.abort();
            return;
        }

        let mut fields = vec![
            Field::time("time", Local::now()),
            Field::string("error", message),
            Field::string("request", dump),
        ];
        if stack {
            fields.push(Field::string(
                "stacktrace",
                std::backtrace::Backtrace::force_capture().to_string(),
            ));
        }
        logger.error("recovery from panic", &fields);

        ctx.abort_with_status(500);
    })
}

/// Headers-only dump of the inbound request, no body
fn request_dump(ctx: &RequestContext) -> String {
    let mut dump = format!("{} {}", ctx.method(), ctx.path());
    if !ctx.raw_query().is_empty() {
        dump.push('?');
        dump.push_str(ctx.raw_query());
    }
    for (name, value) in ctx.headers() {
        dump.push('\n');
        dump.push_str(name);
        dump.push_str(": ");
        dump.push_str(value);
    }
    dump
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Transport-level signal that the peer hung up mid-response
fn is_broken_connection(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("broken pipe") || message.contains("connection reset by peer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_connection_classification() {
        assert!(is_broken_connection("write tcp: Broken pipe"));
        assert!(is_broken_connection("connection reset by peer"));
        assert!(!is_broken_connection("index out of bounds"));
    }

    #[test]
    fn test_request_dump_headers_only() {
        let ctx = RequestContext::new("POST", "/items")
            .with_query("limit=5")
            .with_header("Host", "example.test")
            .with_header("User-Agent", "curl/8.0");

        let dump = request_dump(&ctx);

        assert!(dump.starts_with("POST /items?limit=5"));
        assert!(dump.contains("Host: example.test"));
        assert!(dump.contains("User-Agent: curl/8.0"));
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(boxed.as_ref()), "owned message");

        let boxed: Box<dyn Any + Send> = Box::new(17_u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
