//! Typed decoding of JSON documents.
//!
//! [`FromJson`] converts a parsed [`serde_json::Value`] into a statically declared
//! shape, checking the shape of the document as it goes. Implementations exist for
//! scalars, strings, the standard containers, tuples, `Option` and [`Value`] itself.
//! Records, named tuples and enums are declared with the [`json_record!`],
//! [`json_named_tuple!`] and [`json_enum!`] macros.
//!
//! ```
//! use apiwrap::json::from_json;
//! use serde_json::json;
//!
//! apiwrap::json_record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Cart {
//!         pub items: Vec<u32>,
//!         pub size: u32 = 81,
//!         pub note: Option<String> = None,
//!     }
//! }
//!
//! let cart: Cart = from_json(json!({"items": ["1", 3]})).unwrap();
//! assert_eq!(cart, Cart { items: vec![1, 3], size: 81, note: None });
//! ```
//!
//! [`json_record!`]: crate::json_record
//! [`json_named_tuple!`]: crate::json_named_tuple
//! [`json_enum!`]: crate::json_enum

use serde_json::{Map, Value};

mod error;
mod impls;
mod macros;
mod path;
mod shapes;

pub use error::FromJsonError;
pub use path::get_by_path;
pub use shapes::{Mapping, Null, Sequence, Union};

/// A type that can be decoded from a JSON value.
pub trait FromJson: Sized {
    /// Whether this type is the JSON `null` type, making it usable as the null arm
    /// of a [`Union`].
    const NULLABLE: bool = false;

    /// Decodes `value`, failing if its shape does not fit.
    fn from_json(value: Value) -> Result<Self, FromJsonError>;
}

/// Decodes `value` as `T`.
pub fn from_json<T: FromJson>(value: Value) -> Result<T, FromJsonError> {
    T::from_json(value)
}

/// Returns the object inside `value`, or a shape mismatch.
pub fn expect_object(value: Value) -> Result<Map<String, Value>, FromJsonError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(FromJsonError::shape_mismatch("`Mapping`", &other)),
    }
}

/// JSON key for a declared field name, with any raw identifier prefix removed.
#[doc(hidden)]
pub fn field_key(name: &'static str) -> &'static str {
    name.strip_prefix("r#").unwrap_or(name)
}

/// Returns the array inside `value`, or a shape mismatch.
pub fn expect_array(value: Value) -> Result<Vec<Value>, FromJsonError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(FromJsonError::shape_mismatch("`List`", &other)),
    }
}

/// Name of the JSON type of `value`, as used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
