//! Runtime shape inspection for flattenable values.
//!
//! [`Reflect`] is the capability the flattener needs from a value: tell
//! whether it is a record, enumerate its fields when it is, and produce the
//! raw [`Value`] when it is passed through. Records get their implementation
//! from `#[derive(Record)]`; scalars, references and smart pointers are
//! covered here.

use crate::value::Value;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Shape of a value as seen by the flattener.
pub enum Shape<'a> {
    /// A record with its fields in declaration order.
    Record(Vec<Field<'a>>),
    /// An absent reference to a record type (`None` of an optional record).
    NullRecord,
    /// Anything else. Passed through as a single value.
    Scalar,
}

impl Shape<'_> {
    /// Whether the value is a record or a reference to one, present or not.
    pub fn is_record(&self) -> bool {
        !matches!(self, Shape::Scalar)
    }
}

/// One declared field of a record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Field identifier as declared.
    pub ident: &'a str,
    /// Metadata as `(key, value)` pairs, e.g. `("db", "first_name")`.
    pub tags: &'static [(&'static str, &'static str)],
    /// Embedded members promote their fields into the enclosing record.
    pub embedded: bool,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(ident: &'a str, value: &'a dyn Reflect) -> Self {
        Field {
            ident,
            tags: &[],
            embedded: false,
            value,
        }
    }

    pub fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Look up the tag stored under `key`.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("ident", &self.ident)
            .field("tags", &self.tags)
            .field("embedded", &self.embedded)
            .field("type_name", &self.value.type_name())
            .finish()
    }
}

/// Capability trait for values that can be flattened or passed through.
pub trait Reflect {
    /// Describe this value's shape.
    fn shape(&self) -> Shape<'_>;

    /// The raw value, used when this value is emitted as a parameter.
    fn to_value(&self) -> Value;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether values of this type are records. Lets an absent optional
    /// record be told apart from an absent scalar.
    fn is_record_type() -> bool
    where
        Self: Sized,
    {
        false
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar
                }

                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

impl_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    char,
    String,
    DateTime<Utc>,
    NaiveDate,
);

impl Reflect for isize {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }
}

impl Reflect for usize {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    fn to_value(&self) -> Value {
        Value::UInt(*self as u64)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Reflect::to_value).collect())
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => inner.shape(),
            None if T::is_record_type() => Shape::NullRecord,
            None => Shape::Scalar,
        }
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, Reflect::to_value)
    }

    fn is_record_type() -> bool {
        T::is_record_type()
    }
}

macro_rules! impl_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                fn shape(&self) -> Shape<'_> {
                    T::shape(self)
                }

                fn to_value(&self) -> Value {
                    T::to_value(self)
                }

                fn type_name(&self) -> &'static str {
                    T::type_name(self)
                }

                fn is_record_type() -> bool {
                    T::is_record_type()
                }
            }
        )*
    };
}

impl_pointer!(Box, Rc, Arc);

impl<T: Reflect> Reflect for &T {
    fn shape(&self) -> Shape<'_> {
        T::shape(self)
    }

    fn to_value(&self) -> Value {
        T::to_value(self)
    }

    fn type_name(&self) -> &'static str {
        T::type_name(self)
    }

    fn is_record_type() -> bool {
        T::is_record_type()
    }
}

/// JSON objects are records whose fields are their keys, in document order.
/// Other JSON values are scalars.
impl Reflect for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            serde_json::Value::Object(map) => Shape::Record(
                map.iter()
                    .map(|(key, value)| Field::new(key, value))
                    .collect(),
            ),
            _ => Shape::Scalar,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Reflect::to_value).collect())
            }
            serde_json::Value::Object(map) => Value::Record(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_are_not_records() {
        assert!(!42_i32.shape().is_record());
        assert!(!"Doe".to_string().shape().is_record());
        assert!(!vec![1_u8, 2].shape().is_record());
        assert_eq!(Some(3_i64).to_value(), Value::Int(3));
        assert_eq!(None::<String>.to_value(), Value::Null);
        assert!(matches!(None::<String>.shape(), Shape::Scalar));
    }

    #[test]
    fn test_pointers_delegate() {
        let boxed = Box::new(7_u32);
        assert_eq!(boxed.to_value(), Value::UInt(7));
        assert_eq!(boxed.type_name(), "u32");

        let shared = Arc::new("x".to_string());
        assert_eq!((&shared).to_value(), Value::Text("x".to_string()));
    }

    #[test]
    fn test_json_object_fields() {
        let doc = json!({"GivenName": "John", "address": {"city": "Oslo"}, "tags": [1, 2]});

        let Shape::Record(fields) = doc.shape() else {
            panic!("Expected a record");
        };
        let idents: Vec<_> = fields.iter().map(|f| f.ident).collect();
        assert_eq!(idents, vec!["GivenName", "address", "tags"]);
        assert!(fields[1].value.shape().is_record());
        assert!(!fields[2].value.shape().is_record());
        assert_eq!(
            fields[2].value.to_value(),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(json!(1.5).to_value(), Value::Float(1.5));
        assert_eq!(json!("a").type_name(), "string");
    }

    #[test]
    fn test_field_tag_lookup() {
        let value = 1_i32;
        let field = Field::new("surname", &value).with_tags(&[("db", "last_name"), ("json", "ln")]);
        assert_eq!(field.tag("db"), Some("last_name"));
        assert_eq!(field.tag("json"), Some("ln"));
        assert_eq!(field.tag("sql"), None);
        assert!(!field.embedded);
        assert!(field.embedded().embedded);
    }
}
