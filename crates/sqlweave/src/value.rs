//! Literal values supplied by the caller.
//!
//! [`Value`] is a closed set of variants; every variant has a rendering rule
//! in [`crate::literal`]. Conversions exist for the usual Rust types so call
//! sites can pass plain values:
//!
//! ```ignore
//! use sqlweave::{Value, values};
//!
//! let row = values![1, values![1, "a", true]];
//! assert_eq!(row[1], Value::Sequence(vec![1.into(), "a".into(), true.into()]));
//! ```

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// `false` for NaN and infinities, which have no SQL or JSON literal.
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            Number::Int(_) | Number::UInt(_) => true,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            // Debug keeps the decimal point (`1.0`) and switches to exponent
            // notation for very large/small magnitudes.
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A caller-supplied literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Sequence(Vec<Value>),
    /// Key/value members in the order they were supplied.
    Mapping(Vec<(String, Value)>),
}

impl Value {
    /// Build a mapping from key/value pairs, keeping their order.
    pub fn mapping<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Human-readable variant name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::UInt(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (k, v) in members {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Number(Number::$variant(v as $target))
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize, u8, u16, u32);
impl_from_int!(UInt as u64: u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(Number::Float(f64::from(v)))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(Number::Float(v))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::Sequence(items.iter().cloned().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::mapping(map)
    }
}

/// Member order follows the hash map's iteration order, which is not stable
/// across equivalent maps.
impl<K: Into<String>, V: Into<Value>, S: BuildHasher> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        Value::mapping(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::UInt(u))
                } else {
                    Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::mapping(map),
        }
    }
}

#[cfg(feature = "chrono")]
mod chrono_impls {
    use super::Value;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
    use std::fmt::Display;

    impl From<NaiveDate> for Value {
        fn from(d: NaiveDate) -> Self {
            Value::Text(d.format("%Y-%m-%d").to_string())
        }
    }

    impl From<NaiveTime> for Value {
        fn from(t: NaiveTime) -> Self {
            Value::Text(t.format("%H:%M:%S%.f").to_string())
        }
    }

    impl From<NaiveDateTime> for Value {
        fn from(dt: NaiveDateTime) -> Self {
            Value::Text(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }
    }

    impl<Tz: TimeZone> From<DateTime<Tz>> for Value
    where
        Tz::Offset: Display,
    {
        fn from(dt: DateTime<Tz>) -> Self {
            Value::Text(dt.to_rfc3339())
        }
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Value {
    fn from(id: uuid::Uuid) -> Self {
        Value::Text(id.hyphenated().to_string())
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```ignore
/// let row = sqlweave::values![1, "a", true, None::<i32>];
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_display_keeps_decimal_point() {
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert_eq!(Number::Float(0.25).to_string(), "0.25");
        assert_eq!(Number::Int(-7).to_string(), "-7");
        assert_eq!(Number::UInt(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn values_macro_nests() {
        let row = values![1, values![1, "a", true]];
        assert_eq!(
            row,
            vec![
                Value::Number(Number::Int(1)),
                Value::Sequence(vec![
                    Value::Number(Number::Int(1)),
                    Value::Text("a".to_string()),
                    Value::Bool(true),
                ]),
            ]
        );
    }

    #[test]
    fn option_none_is_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn btree_map_is_key_ordered() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        let Value::Mapping(members) = Value::from(map) else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = members.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn from_serde_json() {
        let v = Value::from(serde_json::json!({"a": [1, 2.5, null]}));
        assert_eq!(
            v,
            Value::mapping([(
                "a",
                Value::Sequence(vec![1.into(), 2.5.into(), Value::Null])
            )])
        );
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn chrono_date_is_iso_text() {
        let d = chrono::NaiveDate::from_ymd_opt(2018, 7, 10).unwrap();
        assert_eq!(Value::from(d), Value::Text("2018-07-10".to_string()));
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuid_is_hyphenated_text() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            Value::from(id),
            Value::Text("00000000-0000-0000-0000-000000000000".to_string())
        );
    }
}
