//! Rendering optional parameters onto a request sink.
//!
//! # Design
//! `QueryWriter` owns the per-parameter rules shared by every parameter set:
//! absent values write nothing, present values are formatted, values that
//! format to an empty string are dropped, and sink failures are collected
//! rather than returned. Parameter sets only list their fields in order.

use std::time::Duration;

use crate::error::{ApiError, CompositeError, ParamError};
use crate::format::FormatRegistry;
use crate::http::ClientRequest;

/// A set of request parameters that knows how to render itself.
pub trait WriteToRequest {
    fn write_to_request(
        &self,
        req: &mut dyn ClientRequest,
        registry: &dyn FormatRegistry,
    ) -> Result<(), ApiError>;
}

/// Writes query parameters onto a sink, accumulating failures.
pub struct QueryWriter<'a> {
    req: &'a mut dyn ClientRequest,
    registry: &'a dyn FormatRegistry,
    errors: Vec<ParamError>,
}

impl<'a> QueryWriter<'a> {
    /// Apply `timeout` to the sink and return a writer for the parameters.
    ///
    /// A rejected timeout is returned immediately; no parameter is written.
    pub fn begin(
        req: &'a mut dyn ClientRequest,
        registry: &'a dyn FormatRegistry,
        timeout: Duration,
    ) -> Result<Self, ParamError> {
        req.set_timeout(timeout)?;
        Ok(Self {
            req,
            registry,
            errors: Vec::new(),
        })
    }

    pub fn string(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.put(name, value);
        }
        self
    }

    pub fn int32(&mut self, name: &str, value: Option<i32>) -> &mut Self {
        if let Some(value) = value {
            let formatted = self.registry.format_i32(value);
            self.put(name, &formatted);
        }
        self
    }

    /// Collected failures as one composite error, if any.
    pub fn finish(self) -> Result<(), CompositeError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CompositeError::new(self.errors))
        }
    }

    fn put(&mut self, name: &str, formatted: &str) {
        // Set-but-empty is indistinguishable from unset on the wire.
        if formatted.is_empty() {
            tracing::trace!(param = name, "dropping empty query parameter");
            return;
        }
        if let Err(err) = self.req.set_query_param(name, formatted) {
            self.errors.push(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Registry;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
        reject: Vec<&'static str>,
    }

    impl ClientRequest for RecordingSink {
        fn set_timeout(&mut self, timeout: Duration) -> Result<(), ParamError> {
            self.calls.push(format!("timeout={}", timeout.as_secs()));
            Ok(())
        }

        fn set_query_param(&mut self, name: &str, value: &str) -> Result<(), ParamError> {
            if self.reject.contains(&name) {
                return Err(ParamError::malformed(name, "rejected"));
            }
            self.calls.push(format!("{name}={value}"));
            Ok(())
        }
    }

    struct Hex;

    impl FormatRegistry for Hex {
        fn format_i32(&self, value: i32) -> String {
            format!("{value:#x}")
        }
    }

    #[test]
    fn timeout_is_applied_before_any_parameter() {
        let mut sink = RecordingSink::default();
        let mut w = QueryWriter::begin(&mut sink, &Registry, Duration::from_secs(9)).unwrap();
        w.string("a", Some("1"));
        w.finish().unwrap();
        assert_eq!(sink.calls, ["timeout=9", "a=1"]);
    }

    #[test]
    fn absent_and_empty_values_are_skipped() {
        let mut sink = RecordingSink::default();
        let mut w = QueryWriter::begin(&mut sink, &Registry, Duration::from_secs(1)).unwrap();
        w.string("absent", None)
            .string("empty", Some(""))
            .int32("none", None)
            .int32("zero", Some(0))
            .int32("max", Some(i32::MAX));
        w.finish().unwrap();
        assert_eq!(sink.calls, ["timeout=1", "zero=0", "max=2147483647"]);
    }

    #[test]
    fn registry_controls_integer_formatting() {
        let mut sink = RecordingSink::default();
        let mut w = QueryWriter::begin(&mut sink, &Hex, Duration::from_secs(1)).unwrap();
        w.int32("n", Some(255));
        w.finish().unwrap();
        assert_eq!(sink.calls[1], "n=0xff");
    }

    #[test]
    fn failures_are_collected_and_writing_continues() {
        let mut sink = RecordingSink {
            reject: vec!["a", "c"],
            ..Default::default()
        };
        let mut w = QueryWriter::begin(&mut sink, &Registry, Duration::from_secs(1)).unwrap();
        w.string("a", Some("1"))
            .string("b", Some("2"))
            .string("c", Some("3"))
            .string("d", Some("4"));
        let err = w.finish().unwrap_err();
        assert_eq!(
            err.errors(),
            [
                ParamError::malformed("a", "rejected"),
                ParamError::malformed("c", "rejected"),
            ]
        );
        assert_eq!(sink.calls, ["timeout=1", "b=2", "d=4"]);
    }
}
