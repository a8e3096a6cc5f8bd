use std::marker::PhantomData;

use serde_json::Value;

use super::error::{ABSTRACT_NOT_SUPPORTED, UNION_NOT_SUPPORTED};
use super::{FromJson, FromJsonError};

/// The JSON `null` type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null;

impl FromJson for Null {
    const NULLABLE: bool = true;

    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        match value {
            Value::Null => Ok(Null),
            other => Err(FromJsonError::shape_mismatch("`null`", &other)),
        }
    }
}

/// A two-armed union.
///
/// Only the optional form, where the right arm is [`Null`], can be decoded; it behaves
/// like `Option<L>`. Any other union fails with
/// [`Unsupported`](FromJsonError::Unsupported).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Union<L, R> {
    /// The value matched the left arm.
    Left(L),
    /// The value matched the right arm.
    Right(R),
}

impl<L: FromJson, R: FromJson> FromJson for Union<L, R> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        if !R::NULLABLE {
            return Err(FromJsonError::Unsupported(UNION_NOT_SUPPORTED));
        }
        match value {
            Value::Null => R::from_json(Value::Null).map(Union::Right),
            value => L::from_json(value).map(Union::Left),
        }
    }
}

/// An abstract key/value mapping without a concrete container. Never decodable.
#[derive(Debug)]
pub struct Mapping<K, V>(PhantomData<fn() -> (K, V)>);

impl<K, V> FromJson for Mapping<K, V> {
    fn from_json(_value: Value) -> Result<Self, FromJsonError> {
        Err(FromJsonError::Unsupported(ABSTRACT_NOT_SUPPORTED))
    }
}

/// An abstract sequence without a concrete container. Never decodable.
#[derive(Debug)]
pub struct Sequence<T>(PhantomData<fn() -> T>);

impl<T> FromJson for Sequence<T> {
    fn from_json(_value: Value) -> Result<Self, FromJsonError> {
        Err(FromJsonError::Unsupported(ABSTRACT_NOT_SUPPORTED))
    }
}
