//! HTTP request/response types and the request-writing sink.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe a round-trip as plain data.
//! Parameter sets never touch an `HttpRequest` directly; they write through
//! the `ClientRequest` trait, which only knows how to take a timeout and a
//! named query parameter. `HttpRequest` is the sink used in production, and
//! tests substitute their own.

use std::time::Duration;

use url::form_urlencoded;

use crate::error::ParamError;

/// The destination a parameter set renders onto.
///
/// Errors are reported per call so the renderer can keep going after a
/// rejected parameter and report every failure at once.
pub trait ClientRequest {
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), ParamError>;

    fn set_query_param(&mut self, name: &str, value: &str) -> Result<(), ParamError>;
}

/// A GET request described as plain data.
///
/// `query` keeps insertion order; setting a key that already exists replaces
/// its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            timeout: None,
        }
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The form-urlencoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// Path plus query string.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        }
    }
}

impl ClientRequest for HttpRequest {
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), ParamError> {
        if timeout.is_zero() {
            return Err(ParamError::InvalidTimeout(timeout));
        }
        self.timeout = Some(timeout);
        Ok(())
    }

    fn set_query_param(&mut self, name: &str, value: &str) -> Result<(), ParamError> {
        if name.is_empty() {
            return Err(ParamError::malformed(name, "empty parameter name"));
        }
        match self.query.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.query.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
