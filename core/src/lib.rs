//! Request parameter rendering and dispatch for the pipeline service API.
//!
//! # Overview
//! A parameter set describes one API call. Optional parameters are `Option`s
//! and are left off the wire when unset; values that format to an empty
//! string are left off as well. Rendering applies the timeout first, then
//! writes each parameter in a fixed order onto a `ClientRequest` sink, and
//! reports every rejected parameter together as one `CompositeError`.
//!
//! # Design
//! - `ClientRequest`, `FormatRegistry` and `Transport` are the seams: where
//!   values go, how scalars are spelled, and who performs the I/O.
//! - `PipelineClient` is stateless; it renders a parameter set onto a fresh
//!   `HttpRequest` and hands it to the parameter set's transport, or the
//!   process-wide default, together with the caller's `Context`.
//! - Nothing here retries, authenticates, or parses responses.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod http;
pub mod params;
pub mod render;
pub mod transport;

pub use client::PipelineClient;
pub use config::ClientConfig;
pub use context::Context;
pub use error::{ApiError, CompositeError, ParamError};
pub use format::{FormatRegistry, Registry};
pub use http::{ClientRequest, HttpRequest, HttpResponse};
pub use params::{ListPipelinesParams, DEFAULT_TIMEOUT};
pub use render::{QueryWriter, WriteToRequest};
pub use transport::{default_transport, Transport, UreqTransport};

pub use tokio_util::sync::CancellationToken;
