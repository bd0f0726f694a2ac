//! Parameters for the list pipelines operation.
//!
//! # Design
//! A `ListPipelinesParams` describes one call: create it, set what you need,
//! render it once, and drop it. Optional query parameters are `Option`s so
//! "never set" stays distinct from "set to zero or empty" until rendering.
//! Each field has a `set_*` method and a chaining `with_*` wrapper around it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::context::Context;
use crate::error::ApiError;
use crate::format::FormatRegistry;
use crate::http::ClientRequest;
use crate::render::{QueryWriter, WriteToRequest};
use crate::transport::Transport;

/// Timeout applied when the caller never sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters for listing pipelines.
pub struct ListPipelinesParams {
    /// A url-encoded, JSON-serialized filter.
    pub filter: Option<String>,
    /// Number of pipelines per page.
    pub page_size: Option<i32>,
    /// Token from a previous response's `next_page_token`.
    pub page_token: Option<String>,
    /// `"field_name"`, `"field_name asc"` or `"field_name desc"`.
    pub sort_by: Option<String>,

    timeout: Duration,
    context: Option<Context>,
    http_client: Option<Arc<dyn Transport>>,
}

impl ListPipelinesParams {
    /// Default timeout, no context, no custom transport, every field unset.
    pub fn new() -> Self {
        Self {
            filter: None,
            page_size: None,
            page_token: None,
            sort_by: None,
            timeout: DEFAULT_TIMEOUT,
            context: None,
            http_client: None,
        }
    }

    /// Like `new`, with `timeout` in place of the default.
    pub fn new_with_timeout(timeout: Duration) -> Self {
        Self::new().with_timeout(timeout)
    }

    /// Like `new`, carrying `context` through to the transport.
    pub fn new_with_context(context: Context) -> Self {
        Self::new().with_context(context)
    }

    /// Like `new`, sending through `client` instead of the default transport.
    pub fn new_with_http_client(client: Arc<dyn Transport>) -> Self {
        Self::new().with_http_client(client)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replace the timeout applied to the request before any parameter.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Set the cancellation scope handed to the transport.
    pub fn set_context(&mut self, context: Context) {
        self.context = Some(context);
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.set_context(context);
        self
    }

    pub fn http_client(&self) -> Option<&Arc<dyn Transport>> {
        self.http_client.as_ref()
    }

    /// Send through `client` instead of the default transport.
    pub fn set_http_client(&mut self, client: Arc<dyn Transport>) {
        self.http_client = Some(client);
    }

    pub fn with_http_client(mut self, client: Arc<dyn Transport>) -> Self {
        self.set_http_client(client);
        self
    }

    /// Set or clear (`None`) the `filter` query parameter.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.set_filter(filter);
        self
    }

    /// Set or clear (`None`) the `page_size` query parameter.
    pub fn set_page_size(&mut self, page_size: Option<i32>) {
        self.page_size = page_size;
    }

    pub fn with_page_size(mut self, page_size: Option<i32>) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Set or clear (`None`) the `page_token` query parameter.
    pub fn set_page_token(&mut self, page_token: Option<String>) {
        self.page_token = page_token;
    }

    pub fn with_page_token(mut self, page_token: Option<String>) -> Self {
        self.set_page_token(page_token);
        self
    }

    /// Set or clear (`None`) the `sort_by` query parameter.
    pub fn set_sort_by(&mut self, sort_by: Option<String>) {
        self.sort_by = sort_by;
    }

    pub fn with_sort_by(mut self, sort_by: Option<String>) -> Self {
        self.set_sort_by(sort_by);
        self
    }
}

impl Default for ListPipelinesParams {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListPipelinesParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPipelinesParams")
            .field("filter", &self.filter)
            .field("page_size", &self.page_size)
            .field("page_token", &self.page_token)
            .field("sort_by", &self.sort_by)
            .field("timeout", &self.timeout)
            .field("context", &self.context)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

impl WriteToRequest for ListPipelinesParams {
    fn write_to_request(
        &self,
        req: &mut dyn ClientRequest,
        registry: &dyn FormatRegistry,
    ) -> Result<(), ApiError> {
        let mut w = QueryWriter::begin(req, registry, self.timeout)?;

        // Wire order follows this list, not the order setters were called in.
        w.string("filter", self.filter.as_deref())
            .int32("page_size", self.page_size)
            .string("page_token", self.page_token.as_deref())
            .string("sort_by", self.sort_by.as_deref());

        w.finish()?;
        Ok(())
    }
}
