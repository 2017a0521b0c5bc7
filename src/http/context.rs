//! Request/response context boundary
//!
//! [`RequestContext`] models the external HTTP framework at its interface
//! boundary: request metadata accessors, a typed key-value store scoped to
//! one in-flight request, an error-accumulation list, response status
//! control and a `next()` continuation driving the remaining handler chain.
//! Each request owns exactly one context on its own worker; nothing here is
//! shared across requests.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// One element of the handler chain. Middleware may call
/// [`RequestContext::next`] to run the rest of the chain before finishing.
pub type Handler = Arc<dyn Fn(&mut RequestContext) + Send + Sync>;

pub struct RequestContext {
    method: String,
    path: String,
    raw_query: String,
    client_ip: String,
    user_agent: String,
    headers: Vec<(String, String)>,
    status: u16,
    aborted: bool,
    errors: Vec<String>,
    store: HashMap<String, Box<dyn Any + Send>>,
    chain: Vec<Handler>,
    index: usize,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            raw_query: String::new(),
            client_ip: String::new(),
            user_agent: String::new(),
            headers: Vec::new(),
            status: 200,
            aborted: false,
            errors: Vec::new(),
            store: HashMap::new(),
            chain: Vec::new(),
            index: 0,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_query(mut self, raw_query: impl Into<String>) -> Self {
        self.raw_query = raw_query.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = client_ip.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a handler to the chain; handlers run in registration order
    #[must_use = "builder methods return a new value"]
    pub fn with_handler(mut self, handler: Handler) -> Self {
        self.chain.push(handler);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Stop the rest of the chain without touching the status
    pub fn abort(&mut self) {
        self.aborted = true;
        self.index = self.chain.len();
    }

    /// Write `status` and stop the rest of the chain
    pub fn abort_with_status(&mut self, status: u16) {
        self.status = status;
        self.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Record a handler error for the completion middleware to report
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Store a value under `key` for the lifetime of this request
    pub fn set<T: Any + Send>(&mut self, key: &str, value: T) {
        self.store.insert(key.to_string(), Box::new(value));
    }

    /// Typed retrieval; a missing key or a value of another type reads as absent
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.store.get(key)?.downcast_ref()
    }

    /// Drive the whole chain from the beginning
    pub fn run(&mut self) {
        self.index = 0;
        self.next();
    }

    /// Invoke the remaining handlers. Control returns here only after the
    /// entire downstream chain completes; the index is shared, so a handler
    /// that calls `next()` itself leaves nothing for the enclosing loop.
    pub fn next(&mut self) {
        while self.index < self.chain.len() {
            let handler = Arc::clone(&self.chain[self.index]);
            self.index += 1;
            handler(self);
        }
    }
}
