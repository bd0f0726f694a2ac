//! Request builder and dispatcher for the pipeline service.
//!
//! # Design
//! `PipelineClient` holds only a `base_url`. `build_*` methods render a
//! parameter set onto a fresh `HttpRequest`; the matching dispatch methods
//! take the parameter set by value, render it, and hand the request to the
//! parameter set's transport (or the process default) along with its
//! cancellation scope. Responses come back raw.

use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::ApiError;
use crate::format::{FormatRegistry, Registry};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::ListPipelinesParams;
use crate::render::WriteToRequest;
use crate::transport::default_transport;

pub const LIST_PIPELINES_PATH: &str = "/apis/v1beta1/pipelines";

/// Stateless client for the pipeline service.
#[derive(Debug, Clone)]
pub struct PipelineClient {
    base_url: String,
}

impl PipelineClient {
    /// Create a client for `base_url`; a trailing slash is ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration, rejecting unparseable base URLs.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        Ok(Self::new(&config.base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render `params` onto a GET request for the pipeline list.
    pub fn build_list_pipelines(
        &self,
        params: &ListPipelinesParams,
        registry: &dyn FormatRegistry,
    ) -> Result<HttpRequest, ApiError> {
        let mut req = HttpRequest::new(format!("{}{LIST_PIPELINES_PATH}", self.base_url));
        params.write_to_request(&mut req, registry)?;
        Ok(req)
    }

    /// Render `params` and send the request.
    pub fn list_pipelines(&self, params: ListPipelinesParams) -> Result<HttpResponse, ApiError> {
        let req = self.build_list_pipelines(&params, &Registry)?;
        let transport = params.http_client().cloned().unwrap_or_else(default_transport);
        let ctx: Context = params.context().cloned().unwrap_or_default();

        tracing::debug!(
            url = %req.url(),
            timeout = ?req.timeout,
            "dispatching request"
        );
        let response = transport.execute(req, &ctx)?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }
}
