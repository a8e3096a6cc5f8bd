use serde_json::Value;
use thiserror::Error;

use super::kind_of;

pub(crate) const UNION_NOT_SUPPORTED: &str = "Union is not supported";
pub(crate) const ABSTRACT_NOT_SUPPORTED: &str = "Abstract types is not supported";

/// Errors raised while decoding a JSON value into a typed shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FromJsonError {
    /// A required field is absent and has no default.
    #[error("missing field `{0}`")]
    MissingField(String),
    /// The JSON value has the wrong shape.
    #[error("Expected {expected}, got: {found}")]
    ShapeMismatch {
        /// The expected shape.
        expected: &'static str,
        /// The JSON type found instead.
        found: &'static str,
    },
    /// A fixed-size sequence has the wrong number of items.
    #[error("Expected {expected} items, got: {found}")]
    LengthMismatch {
        /// The expected number of items.
        expected: usize,
        /// The number of items found.
        found: usize,
    },
    /// The target type cannot be decoded.
    #[error("{0}")]
    Unsupported(&'static str),
    /// The value has the right shape but is not acceptable, e.g. an unknown enum value.
    #[error("{0}")]
    InvalidValue(String),
    /// A path segment used on a list is not an integer.
    #[error("list indices must be integers, got: {0:?}")]
    InvalidIndex(String),
    /// A path segment used on a list is out of range.
    #[error("list index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// The length of the list.
        len: usize,
    },
}

impl FromJsonError {
    /// A missing field error.
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField(name.into())
    }

    /// A shape mismatch between `expected` and the JSON type of `found`.
    pub fn shape_mismatch(expected: &'static str, found: &Value) -> Self {
        Self::ShapeMismatch {
            expected,
            found: kind_of(found),
        }
    }

    /// An invalid value error.
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }
}
