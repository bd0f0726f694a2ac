//! Error types for the pipeline API client.
//!
//! # Design
//! `ParamError` is what a request sink reports for a single value it cannot
//! accept. Rendering collects per-parameter failures into a `CompositeError`
//! so a caller sees every malformed parameter from one call. `ApiError` is
//! the top-level error returned by rendering and dispatch.

use std::fmt;
use std::time::Duration;

/// A single value rejected by a request sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The sink refused the timeout.
    #[error("invalid timeout {0:?}")]
    InvalidTimeout(Duration),

    /// The sink refused a named parameter.
    #[error("malformed parameter `{name}`: {reason}")]
    Malformed { name: String, reason: String },
}

impl ParamError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ParamError::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Every parameter failure from one render pass, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeError {
    errors: Vec<ParamError>,
}

impl CompositeError {
    pub fn new(errors: Vec<ParamError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[ParamError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ParamError> {
        self.errors
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failure list:")?;
        for err in &self.errors {
            write!(f, "\n{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositeError {}

impl<'a> IntoIterator for &'a CompositeError {
    type Item = &'a ParamError;
    type IntoIter = std::slice::Iter<'a, ParamError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors returned by rendering and dispatching a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A fatal sink failure, such as a rejected timeout.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// One or more parameters were rejected by the sink.
    #[error(transparent)]
    Composite(#[from] CompositeError),

    /// The cancellation scope was cancelled before the request was sent.
    #[error("request cancelled")]
    Cancelled,

    /// The cancellation scope's deadline passed before the request was sent.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The transport failed to complete the round-trip.
    #[error("transport error: {0}")]
    Transport(String),

    /// The configured base URL could not be parsed.
    #[error("invalid base url `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_display_lists_every_failure() {
        let err = CompositeError::new(vec![
            ParamError::malformed("filter", "bad"),
            ParamError::malformed("sort_by", "worse"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failure list:\n\
             malformed parameter `filter`: bad\n\
             malformed parameter `sort_by`: worse"
        );
    }

    #[test]
    fn composite_iterates_in_encounter_order() {
        let err = CompositeError::new(vec![
            ParamError::malformed("b", "x"),
            ParamError::malformed("a", "y"),
        ]);
        let names: Vec<_> = (&err)
            .into_iter()
            .map(|e| match e {
                ParamError::Malformed { name, .. } => name.as_str(),
                ParamError::InvalidTimeout(_) => "",
            })
            .collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn api_error_is_transparent_over_param_error() {
        let err = ApiError::from(ParamError::InvalidTimeout(Duration::ZERO));
        assert_eq!(err.to_string(), "invalid timeout 0ns");
    }
}
