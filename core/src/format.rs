//! Canonical wire formatting for non-string scalars.
//!
//! Every integer parameter across the client goes through a
//! `FormatRegistry`, so the same type is always rendered the same way.

/// Formats scalar values to their wire representation.
///
/// The provided method gives canonical decimal output; override it to change
/// how integers are rendered everywhere.
pub trait FormatRegistry {
    fn format_i32(&self, value: i32) -> String {
        value.to_string()
    }
}

/// The default registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registry;

impl FormatRegistry for Registry {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_format_as_plain_decimal() {
        assert_eq!(Registry.format_i32(25), "25");
        assert_eq!(Registry.format_i32(0), "0");
        assert_eq!(Registry.format_i32(-7), "-7");
        assert_eq!(Registry.format_i32(i32::MIN), "-2147483648");
    }
}
