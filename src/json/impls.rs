use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use serde_json::Value;

use super::{expect_array, expect_object, FromJson, FromJsonError};

impl FromJson for Value {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        Ok(value)
    }
}

impl FromJson for bool {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(FromJsonError::shape_mismatch("`bool`", &other)),
        }
    }
}

impl FromJson for String {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(FromJsonError::shape_mismatch("`str`", &other)),
        }
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl FromJson for $ty {
            fn from_json(value: Value) -> Result<Self, FromJsonError> {
                let wide = match &value {
                    Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
                        (Some(i), _, _) => i128::from(i),
                        (None, Some(u), _) => i128::from(u),
                        (None, None, Some(f)) if f.is_finite() => f.trunc() as i128,
                        _ => return Err(FromJsonError::invalid_value(format!(
                            "cannot convert {n} to {}",
                            stringify!($ty)
                        ))),
                    },
                    Value::String(s) => s.trim().parse::<i128>().map_err(|_| {
                        FromJsonError::invalid_value(format!(
                            "invalid literal for {}: {s:?}",
                            stringify!($ty)
                        ))
                    })?,
                    other => return Err(FromJsonError::shape_mismatch("`int`", other)),
                };
                <$ty>::try_from(wide).map_err(|_| {
                    FromJsonError::invalid_value(format!(
                        "{wide} is out of range for {}",
                        stringify!($ty)
                    ))
                })
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FromJson for $ty {
            fn from_json(value: Value) -> Result<Self, FromJsonError> {
                match &value {
                    Value::Number(n) => n.as_f64().map(|f| f as $ty).ok_or_else(|| {
                        FromJsonError::invalid_value(format!(
                            "cannot convert {n} to {}",
                            stringify!($ty)
                        ))
                    }),
                    Value::String(s) => s.trim().parse::<$ty>().map_err(|_| {
                        FromJsonError::invalid_value(format!(
                            "could not convert string to {}: {s:?}",
                            stringify!($ty)
                        ))
                    }),
                    other => Err(FromJsonError::shape_mismatch("`float`", other)),
                }
            }
        }
    )*};
}

impl_float!(f32, f64);

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_json(value).map(Some),
        }
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        T::from_json(value).map(Box::new)
    }
}

fn collect_items<T: FromJson, C: FromIterator<T>>(value: Value) -> Result<C, FromJsonError> {
    expect_array(value)?.into_iter().map(T::from_json).collect()
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        collect_items(value)
    }
}

impl<T: FromJson> FromJson for VecDeque<T> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        collect_items(value)
    }
}

impl<T: FromJson> FromJson for Box<[T]> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        collect_items(value)
    }
}

impl<T: FromJson + Ord> FromJson for BTreeSet<T> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        collect_items(value)
    }
}

impl<T, S> FromJson for HashSet<T, S>
where
    T: FromJson + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        collect_items(value)
    }
}

fn collect_entries<K, V, C>(value: Value) -> Result<C, FromJsonError>
where
    K: FromJson,
    V: FromJson,
    C: FromIterator<(K, V)>,
{
    expect_object(value)?
        .into_iter()
        .map(|(k, v)| Ok((K::from_json(Value::String(k))?, V::from_json(v)?)))
        .collect()
}

impl<K: FromJson + Ord, V: FromJson> FromJson for BTreeMap<K, V> {
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        collect_entries(value)
    }
}

impl<K, V, S> FromJson for HashMap<K, V, S>
where
    K: FromJson + Eq + Hash,
    V: FromJson,
    S: BuildHasher + Default,
{
    fn from_json(value: Value) -> Result<Self, FromJsonError> {
        collect_entries(value)
    }
}

macro_rules! impl_tuple {
    ($len:literal => $($ty:ident $var:ident),+) => {
        impl<$($ty: FromJson),+> FromJson for ($($ty,)+) {
            fn from_json(value: Value) -> Result<Self, FromJsonError> {
                let items = expect_array(value)?;
                let found = items.len();
                let [$($var),+]: [Value; $len] = items
                    .try_into()
                    .map_err(|_| FromJsonError::LengthMismatch { expected: $len, found })?;
                Ok(($($ty::from_json($var)?,)+))
            }
        }
    };
}

impl_tuple!(1 => A a);
impl_tuple!(2 => A a, B b);
impl_tuple!(3 => A a, B b, C c);
impl_tuple!(4 => A a, B b, C c, D d);
impl_tuple!(5 => A a, B b, C c, D d, E e);
impl_tuple!(6 => A a, B b, C c, D d, E e, F f);
impl_tuple!(7 => A a, B b, C c, D d, E e, F f, G g);
impl_tuple!(8 => A a, B b, C c, D d, E e, F f, G g, H h);
