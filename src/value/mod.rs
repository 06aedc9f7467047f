//! Dynamic value model that guards are tested against.
//!
//! Dispatch routes calls by inspecting concrete argument values at run time,
//! so arguments are carried as [`Value`], a small dynamic type covering the
//! scalar, collection, and object shapes guards know how to probe. Type
//! references are first-class ([`Value::Type`]), which is what makes "equals
//! the type `Int`" and "is an instance of `Int`" two different guards.

pub mod capabilities;

pub use self::capabilities::{capability_names, invoke_capability, respond_to};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The absent value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A string-keyed mapping.
    Map(BTreeMap<String, Value>),
    /// A first-class type reference.
    Type(ValueType),
    /// A host object: a named bag of members.
    Object(Object),
}

/// A type tag, usable both as an instance-of guard and as a value in its
/// own right (via [`Value::Type`]).
///
/// `Any` and `Number` are abstract: no value has them as its concrete type,
/// but `Any` admits every value and `Number` admits `Int` and `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Admits every value.
    Any,
    /// Admits `Int` and `Float`.
    Number,
    /// The type of `Value::Nil`.
    Nil,
    /// The type of booleans.
    Bool,
    /// The type of integers.
    Int,
    /// The type of floats.
    Float,
    /// The type of strings.
    Str,
    /// The type of lists.
    List,
    /// The type of maps.
    Map,
    /// The type of type references themselves.
    Type,
    /// The type of host objects.
    Object,
}

impl ValueType {
    /// Instance-of test, abstract types included.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::Any => true,
            ValueType::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            ValueType::Nil => matches!(value, Value::Nil),
            ValueType::Bool => matches!(value, Value::Bool(_)),
            ValueType::Int => matches!(value, Value::Int(_)),
            ValueType::Float => matches!(value, Value::Float(_)),
            ValueType::Str => matches!(value, Value::Str(_)),
            ValueType::List => matches!(value, Value::List(_)),
            ValueType::Map => matches!(value, Value::Map(_)),
            ValueType::Type => matches!(value, Value::Type(_)),
            ValueType::Object => matches!(value, Value::Object(_)),
        }
    }

    /// Short type name.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Any => "Any",
            ValueType::Number => "Number",
            ValueType::Nil => "Nil",
            ValueType::Bool => "Bool",
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::Str => "Str",
            ValueType::List => "List",
            ValueType::Map => "Map",
            ValueType::Type => "Type",
            ValueType::Object => "Object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A host object: a type name plus named members.
///
/// Members double as the object's capabilities: the object responds to
/// exactly its member names (plus the universal `to_s`), and invoking a
/// member capability reads the member's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Name of the object's type.
    pub type_name: String,
    /// Named members.
    pub members: BTreeMap<String, Value>,
}

impl Object {
    /// Create an object with no members.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            members: BTreeMap::new(),
        }
    }

    /// Builder-style member insertion.
    pub fn member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }
}

impl Value {
    /// The concrete type of this value.
    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Nil => ValueType::Nil,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
            Value::Type(_) => ValueType::Type,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Short name of the concrete type.
    pub fn type_name(&self) -> &'static str {
        self.type_of().name()
    }

    /// Build a list value from anything convertible.
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Value {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Convert to a `serde_json` value.
    ///
    /// Lossy at the edges: type references become their name as a string,
    /// objects become a map of their members.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(x) => serde_json::Value::from(*x),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Type(ty) => serde_json::Value::String(ty.name().to_string()),
            Value::Object(obj) => serde_json::Value::Object(
                obj.members
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    // Rendering used inside collections: strings are quoted there, while
    // Display at the top level yields raw string content.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.render(f)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: ")?;
                    value.render(f)?;
                }
                write!(f, "}}")
            }
            Value::Type(ty) => write!(f, "{ty}"),
            Value::Object(obj) => {
                write!(f, "{} {{", obj.type_name)?;
                for (i, (name, value)) in obj.members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {name}: ")?;
                    value.render(f)?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl From<ValueType> for Value {
    fn from(ty: ValueType) -> Self {
        Value::Type(ty)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_of_concrete_types() {
        assert!(ValueType::Int.matches(&Value::Int(2)));
        assert!(!ValueType::Int.matches(&Value::Str("2".into())));
        assert!(ValueType::Str.matches(&Value::Str("x".into())));
        assert!(ValueType::List.matches(&Value::list([1, 2])));
    }

    #[test]
    fn test_abstract_types_admit_subtypes() {
        assert!(ValueType::Number.matches(&Value::Int(1)));
        assert!(ValueType::Number.matches(&Value::Float(1.5)));
        assert!(!ValueType::Number.matches(&Value::Str("1".into())));
        assert!(ValueType::Any.matches(&Value::Nil));
        assert!(ValueType::Any.matches(&Value::Type(ValueType::Int)));
    }

    #[test]
    fn test_type_reference_is_not_an_instance() {
        // The reference `Int` is a Type value; only `Int` *instances* match.
        assert!(!ValueType::Int.matches(&Value::Type(ValueType::Int)));
        assert!(ValueType::Type.matches(&Value::Type(ValueType::Int)));
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Value::list(Vec::<i64>::new()).to_string(), "[]");
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Str("a".into())]).to_string(),
            "[1, \"a\"]"
        );
        assert_eq!(Value::Str("plain".into()).to_string(), "plain");
        assert_eq!(Value::Type(ValueType::Number).to_string(), "Number");
    }

    #[test]
    fn test_equality_is_strict_per_shape() {
        assert_ne!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Str("2".into()), Value::Int(2));
    }

    #[test]
    fn test_json_interop_round_trip() {
        let json = serde_json::json!({"name": "box", "sizes": [1, 2.5], "open": true});
        let value = Value::from(json.clone());
        assert_eq!(
            value,
            Value::Map(BTreeMap::from([
                ("name".to_string(), Value::Str("box".into())),
                (
                    "sizes".to_string(),
                    Value::List(vec![Value::Int(1), Value::Float(2.5)])
                ),
                ("open".to_string(), Value::Bool(true)),
            ]))
        );
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn test_value_serde_round_trip() {
        let value = Value::Object(
            Object::new("Point").member("x", 1).member("y", 2),
        );
        let encoded = serde_json::to_string(&value).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
