/// Declares a struct that decodes from a JSON object.
///
/// Each field is looked up by its name, so `r#type` reads the key `type`. A field may carry a default expression after
/// `=`, which is evaluated only when the key is absent; fields without one are required.
///
/// ```
/// use apiwrap::json::{from_json, FromJsonError};
/// use serde_json::json;
///
/// apiwrap::json_record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Settings {
///         pub name: String,
///         pub size: u32 = 81,
///         pub tags: Vec<String> = Vec::new(),
///     }
/// }
///
/// let settings: Settings = from_json(json!({"name": "x"})).unwrap();
/// assert_eq!(settings.size, 81);
/// assert_eq!(
///     from_json::<Settings>(json!({})),
///     Err(FromJsonError::MissingField("name".into()))
/// );
/// ```
#[macro_export]
macro_rules! json_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::json::FromJson for $name {
            fn from_json(
                value: $crate::__private::Value,
            ) -> ::core::result::Result<Self, $crate::json::FromJsonError> {
                #[allow(unused_mut, unused_variables)]
                let mut object = $crate::json::expect_object(value)?;
                ::core::result::Result::Ok(Self {
                    $(
                        $field: $crate::__json_field!(
                            object.remove($crate::json::field_key(::core::stringify!($field))),
                            $crate::json::field_key(::core::stringify!($field)),
                            $ty
                            $(, $default)?
                        ),
                    )*
                })
            }
        }
    };
}

/// Declares a struct that decodes from either a positional JSON array or a JSON object.
///
/// Arrays are matched to fields by position; trailing fields with defaults may be left
/// out and items past the last field are ignored. Objects are decoded exactly like
/// [`json_record!`].
///
/// ```
/// use apiwrap::json::from_json;
/// use serde_json::json;
///
/// apiwrap::json_named_tuple! {
///     #[derive(Debug, PartialEq)]
///     pub struct Point {
///         pub x: i32,
///         pub y: i32 = 0,
///     }
/// }
///
/// assert_eq!(from_json::<Point>(json!([1, 2])), Ok(Point { x: 1, y: 2 }));
/// assert_eq!(from_json::<Point>(json!([1])), Ok(Point { x: 1, y: 0 }));
/// assert_eq!(from_json::<Point>(json!({"x": 3})), Ok(Point { x: 3, y: 0 }));
/// ```
#[macro_export]
macro_rules! json_named_tuple {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::json::FromJson for $name {
            fn from_json(
                value: $crate::__private::Value,
            ) -> ::core::result::Result<Self, $crate::json::FromJsonError> {
                match value {
                    $crate::__private::Value::Array(items) => {
                        #[allow(unused_mut, unused_variables)]
                        let mut items = items.into_iter();
                        ::core::result::Result::Ok(Self {
                            $(
                                $field: $crate::__json_field!(
                                    items.next(),
                                    $crate::json::field_key(::core::stringify!($field)),
                                    $ty
                                    $(, $default)?
                                ),
                            )*
                        })
                    }
                    $crate::__private::Value::Object(mut object) => {
                        ::core::result::Result::Ok(Self {
                            $(
                                $field: $crate::__json_field!(
                                    object.remove($crate::json::field_key(::core::stringify!($field))),
                                    $crate::json::field_key(::core::stringify!($field)),
                                    $ty
                                    $(, $default)?
                                ),
                            )*
                        })
                    }
                    other => ::core::result::Result::Err(
                        $crate::json::FromJsonError::shape_mismatch("`List` or `Mapping`", &other),
                    ),
                }
            }
        }
    };
}

/// Declares an enum whose variants decode from JSON literals.
///
/// ```
/// use apiwrap::json::from_json;
/// use serde_json::json;
///
/// apiwrap::json_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Genre {
///         Indie = 1,
///         Rock = 2,
///     }
/// }
///
/// assert_eq!(from_json::<Genre>(json!(1)), Ok(Genre::Indie));
/// assert_eq!(Genre::Rock.to_json(), json!(2));
/// assert!(from_json::<Genre>(json!(3)).is_err());
/// ```
#[macro_export]
macro_rules! json_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// The JSON value this variant decodes from.
            #[allow(dead_code)]
            pub fn to_json(&self) -> $crate::__private::Value {
                match self {
                    $(Self::$variant => $crate::__private::json!($value),)+
                }
            }
        }

        impl $crate::json::FromJson for $name {
            fn from_json(
                value: $crate::__private::Value,
            ) -> ::core::result::Result<Self, $crate::json::FromJsonError> {
                $(
                    if value == $crate::__private::json!($value) {
                        return ::core::result::Result::Ok(Self::$variant);
                    }
                )+
                ::core::result::Result::Err($crate::json::FromJsonError::invalid_value(
                    ::std::format!("{} is not a valid {}", value, ::core::stringify!($name)),
                ))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __json_field {
    ($value:expr, $key:expr, $ty:ty) => {
        match $value {
            ::core::option::Option::Some(value) => {
                <$ty as $crate::json::FromJson>::from_json(value)?
            }
            ::core::option::Option::None => {
                return ::core::result::Result::Err(
                    $crate::json::FromJsonError::missing_field($key),
                )
            }
        }
    };
    ($value:expr, $key:expr, $ty:ty, $default:expr) => {
        match $value {
            ::core::option::Option::Some(value) => {
                <$ty as $crate::json::FromJson>::from_json(value)?
            }
            ::core::option::Option::None => $default,
        }
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::json::{from_json, FromJsonError, Null, Union};

    crate::json_record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Owner {
            id: u64,
            login: String,
            site_admin: bool = false,
        }
    }

    crate::json_record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Repo {
            name: String,
            owner: Owner,
            stars: u32 = 0,
            topics: Vec<String> = Vec::new(),
            homepage: Union<String, Null> = Union::Right(Null),
        }
    }

    crate::json_named_tuple! {
        #[derive(Debug, PartialEq)]
        struct Range {
            start: i64,
            end: Option<i64> = None,
        }
    }

    crate::json_enum! {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum ErrorCode {
            Missing = "missing",
            Invalid = "invalid",
        }
    }

    #[test]
    fn nested_records() {
        let repo: Repo = from_json(json!({
            "name": "apiwrap",
            "owner": {"id": 7, "login": "ferris"},
            "stars": "12",
            "homepage": null,
        }))
        .unwrap();
        assert_eq!(
            repo,
            Repo {
                name: "apiwrap".into(),
                owner: Owner {
                    id: 7,
                    login: "ferris".into(),
                    site_admin: false,
                },
                stars: 12,
                topics: vec![],
                homepage: Union::Right(Null),
            }
        );
    }

    #[test]
    fn missing_required_field() {
        let err = from_json::<Owner>(json!({"id": 1})).unwrap_err();
        assert_eq!(err, FromJsonError::MissingField("login".into()));
    }

    #[test]
    fn record_from_non_object() {
        let err = from_json::<Owner>(json!([1, "x"])).unwrap_err();
        assert_eq!(err.to_string(), "Expected `Mapping`, got: array");
    }

    #[test]
    fn named_tuple_shapes() {
        assert_eq!(
            from_json::<Range>(json!([1, 5])),
            Ok(Range { start: 1, end: Some(5) })
        );
        assert_eq!(
            from_json::<Range>(json!({"start": 2})),
            Ok(Range { start: 2, end: None })
        );
        assert_eq!(
            from_json::<Range>(json!([1, 2, 3])),
            Ok(Range { start: 1, end: Some(2) })
        );
        assert_eq!(
            from_json::<Range>(json!([])),
            Err(FromJsonError::MissingField("start".into()))
        );
        assert_eq!(
            from_json::<Range>(json!("1..2")).unwrap_err().to_string(),
            "Expected `List` or `Mapping`, got: string"
        );
    }

    crate::json_record! {
        #[derive(Debug, PartialEq)]
        struct Account {
            login: String,
            r#type: String,
        }
    }

    crate::json_named_tuple! {
        #[derive(Debug, PartialEq)]
        struct Token {
            r#ref: String,
            r#match: bool = false,
        }
    }

    #[test]
    fn raw_identifier_fields_use_plain_key() {
        assert_eq!(
            from_json::<Account>(json!({"login": "ferris", "type": "User"})),
            Ok(Account {
                login: "ferris".into(),
                r#type: "User".into(),
            })
        );
        assert_eq!(
            from_json::<Account>(json!({"login": "ferris"})),
            Err(FromJsonError::MissingField("type".into()))
        );
        assert_eq!(
            from_json::<Token>(json!({"ref": "main", "match": true})),
            Ok(Token { r#ref: "main".into(), r#match: true })
        );
        assert_eq!(
            from_json::<Token>(json!([])),
            Err(FromJsonError::MissingField("ref".into()))
        );
    }

    #[test]
    fn named_tuple_ignores_surplus_items() {
        assert_eq!(
            from_json::<Range>(json!([4, 8, "extra", null])),
            Ok(Range { start: 4, end: Some(8) })
        );
        assert_eq!(
            from_json::<Token>(json!(["v1", false, 3])),
            Ok(Token { r#ref: "v1".into(), r#match: false })
        );
    }

    #[test]
    fn enum_values() {
        assert_eq!(from_json::<ErrorCode>(json!("missing")), Ok(ErrorCode::Missing));
        assert_eq!(ErrorCode::Invalid.to_json(), json!("invalid"));
        assert_eq!(
            from_json::<ErrorCode>(json!("gone")).unwrap_err().to_string(),
            "\"gone\" is not a valid ErrorCode"
        );
    }

    mod properties {
        use proptest::prelude::*;
        use serde_json::json;

        use super::{Owner, Repo};
        use crate::json::{from_json, Null, Union};

        fn owner() -> impl Strategy<Value = Owner> {
            (any::<u64>(), "[a-z][a-z0-9-]{0,15}", any::<bool>()).prop_map(
                |(id, login, site_admin)| Owner {
                    id,
                    login,
                    site_admin,
                },
            )
        }

        fn repo() -> impl Strategy<Value = Repo> {
            (
                "[a-z]{1,12}",
                owner(),
                any::<u32>(),
                prop::collection::vec("[a-z]{1,6}", 0..4),
                prop::option::of("https://[a-z]{1,8}\\.org"),
            )
                .prop_map(|(name, owner, stars, topics, homepage)| Repo {
                    name,
                    owner,
                    stars,
                    topics,
                    homepage: homepage.map_or(Union::Right(Null), Union::Left),
                })
        }

        fn to_json(repo: &Repo) -> serde_json::Value {
            let homepage = match &repo.homepage {
                Union::Left(url) => json!(url),
                Union::Right(Null) => json!(null),
            };
            json!({
                "name": repo.name,
                "owner": {
                    "id": repo.owner.id,
                    "login": repo.owner.login,
                    "site_admin": repo.owner.site_admin,
                },
                "stars": repo.stars,
                "topics": repo.topics,
                "homepage": homepage,
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

            #[test]
            fn records_round_trip(repo in repo()) {
                prop_assert_eq!(from_json::<Repo>(to_json(&repo)), Ok(repo));
            }

            #[test]
            fn absent_optional_fields_take_defaults(name in "[a-z]{1,12}", id in any::<u64>()) {
                let repo = from_json::<Repo>(json!({
                    "name": name,
                    "owner": {"id": id, "login": "x"},
                }))
                .unwrap();
                prop_assert_eq!(repo.stars, 0);
                prop_assert!(repo.topics.is_empty());
                prop_assert_eq!(repo.homepage, Union::Right(Null));
                prop_assert!(!repo.owner.site_admin);
            }
        }
    }
}
