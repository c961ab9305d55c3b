//! Variant error types.
//!
//! Every accessor failure falls into one of three kinds: the variant was
//! empty, it held a different class of value, or the value does not fit the
//! requested type. Conversions of nested data wrap the failure with the key
//! or index where it happened.

use thiserror::Error;

use crate::kind::VariantKind;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Errors raised when reading a [`Variant`](crate::Variant) back into a
/// static type.
///
/// Construction, copy and move never fail; only the read side does.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// A strict accessor was called on a variant holding no value
    #[error("attempt to read `{requested}` from an empty variant")]
    EmptyValue { requested: String },

    /// The stored class differs from the requested one
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: VariantKind,
        actual: VariantKind,
    },

    /// The stored value lies outside the requested type's range
    #[error("the type '{type_name}' can not hold the value '{value}'")]
    RangeOverflow { type_name: String, value: String },

    /// Failure inside a nested sequence or mapping
    #[error("at {location}: {source}")]
    At {
        location: String,
        #[source]
        source: Box<VariantError>,
    },
}

/// The three failure kinds, with nesting context stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyValue,
    TypeMismatch,
    RangeOverflow,
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl VariantError {
    /// Create an empty value error
    pub fn empty_value(requested: impl Into<String>) -> Self {
        Self::EmptyValue {
            requested: requested.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: VariantKind, actual: VariantKind) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create a range overflow error
    pub fn range_overflow(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::RangeOverflow {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Add mapping key context
    pub fn at_key(self, key: impl AsRef<str>) -> Self {
        Self::At {
            location: format!("key '{}'", key.as_ref()),
            source: Box::new(self),
        }
    }

    /// Add sequence index context
    pub fn at_index(self, index: usize) -> Self {
        Self::At {
            location: format!("index {index}"),
            source: Box::new(self),
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl VariantError {
    /// The underlying failure kind, looking through nesting context
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyValue { .. } => ErrorKind::EmptyValue,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::RangeOverflow { .. } => ErrorKind::RangeOverflow,
            Self::At { source, .. } => source.kind(),
        }
    }

    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::EmptyValue => "VARIANT_EMPTY",
            ErrorKind::TypeMismatch => "VARIANT_TYPE_MISMATCH",
            ErrorKind::RangeOverflow => "VARIANT_RANGE_OVERFLOW",
        }
    }

    /// The innermost error, without key/index context
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::At { source, .. } = current {
            current = source;
        }
        current
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for variant accessors
pub type Result<T> = std::result::Result<T, VariantError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_overflow_message() {
        let err = VariantError::range_overflow("i16", "100000");
        assert_eq!(
            err.to_string(),
            "the type 'i16' can not hold the value '100000'"
        );
        assert_eq!(err.kind(), ErrorKind::RangeOverflow);
        assert_eq!(err.code(), "VARIANT_RANGE_OVERFLOW");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = VariantError::type_mismatch(VariantKind::Signed, VariantKind::Text);
        assert_eq!(err.to_string(), "type mismatch: expected signed, got text");
        assert_eq!(err.code(), "VARIANT_TYPE_MISMATCH");
    }

    #[test]
    fn test_context_keeps_kind() {
        let err = VariantError::empty_value("i32")
            .at_index(2)
            .at_key("tags");

        assert_eq!(err.kind(), ErrorKind::EmptyValue);
        assert_eq!(err.code(), "VARIANT_EMPTY");
        assert_eq!(
            err.to_string(),
            "at key 'tags': at index 2: attempt to read `i32` from an empty variant"
        );
        assert_eq!(err.root_cause(), &VariantError::empty_value("i32"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = VariantError::range_overflow("u8", "256").at_key("level");
        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("the type 'u8' can not hold the value '256'")
        );
    }
}
