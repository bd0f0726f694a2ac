//! Pluggable transports that execute an `HttpRequest`.
//!
//! # Design
//! The core never performs I/O on its own; a `Transport` does. Parameter
//! sets may carry their own transport, otherwise the process-wide default
//! from `default_transport()` is used. The transport is where the caller's
//! `Context` is enforced, both before sending and while the request is in
//! flight.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use crate::context::Context;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::DEFAULT_TIMEOUT;

/// How often an in-flight request checks its context for cancellation.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Executes one HTTP round-trip.
///
/// Implementations must return `ApiError::Cancelled` if the context is
/// cancelled before the response arrives.
pub trait Transport: Send + Sync {
    fn execute(&self, req: HttpRequest, ctx: &Context) -> Result<HttpResponse, ApiError>;
}

/// The transport used when a parameter set carries none.
pub fn default_transport() -> Arc<dyn Transport> {
    static DEFAULT: OnceLock<Arc<dyn Transport>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| Arc::new(UreqTransport::new()))
        .clone()
}

/// Blocking transport backed by a shared `ureq::Agent`.
///
/// Non-2xx statuses are returned as responses, not errors. The round-trip
/// runs on a worker thread so the caller can return as soon as its context
/// is cancelled; the abandoned worker still ends at the request timeout.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Refuse contexts that are already done; otherwise pick the timeout.
    fn admit(req: &HttpRequest, ctx: &Context) -> Result<Duration, ApiError> {
        if ctx.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        let timeout = ctx.effective_timeout(req.timeout.unwrap_or(DEFAULT_TIMEOUT));
        if timeout.is_zero() {
            return Err(ApiError::DeadlineExceeded);
        }
        Ok(timeout)
    }

    fn get(agent: &ureq::Agent, url: &str, timeout: Duration) -> Result<HttpResponse, ApiError> {
        let mut response = agent
            .get(url)
            .config()
            .timeout_global(Some(timeout))
            .build()
            .call()
            .map_err(|e| match e {
                ureq::Error::Timeout(_) => ApiError::DeadlineExceeded,
                other => ApiError::Transport(other.to_string()),
            })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest, ctx: &Context) -> Result<HttpResponse, ApiError> {
        let timeout = Self::admit(&req, ctx)?;
        let url = req.url();
        let agent = self.agent.clone();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver is gone if the caller was cancelled.
            let _ = tx.send(Self::get(&agent, &url, timeout));
        });

        loop {
            match rx.recv_timeout(CANCEL_POLL_INTERVAL) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) if ctx.is_cancelled() => {
                    tracing::debug!("request cancelled in flight");
                    return Err(ApiError::Cancelled);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(ApiError::Transport("request worker exited".to_string()));
                }
            }
        }
    }
}
