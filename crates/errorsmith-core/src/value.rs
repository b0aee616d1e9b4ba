//! Dynamic values carried by error descriptions and error instances.
//!
//! Descriptions are frequently read from configuration files, so names and
//! attribute values arrive as loosely typed [`Value`]s and are only narrowed
//! down to [`AttributeValue`]s once validated. Arguments supplied when an
//! error is raised stay [`Value`]s: any shape is accepted there.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Insertion-ordered string keyed map of values.
///
/// This is also the type of the auxiliary `data` payload of error instances.
pub type Map = IndexMap<String, Value>;

/// A loosely typed value.
///
/// # Examples
///
/// ```
/// use errorsmith_core::value::Value;
///
/// let status = Value::from(403);
/// assert_eq!(status, Value::Number(403.0));
/// assert_eq!(status.type_name(), "number");
///
/// let tags = Value::from(vec![Value::from("auth"), Value::from(true)]);
/// assert_eq!(tags.to_string(), "[auth, true]");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Returns the name of the runtime kind of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns the string slice if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this value is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this value is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the map if this value is a map.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this value is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Formats numbers without a trailing `.0` when they hold an integer.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, *n),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (idx, (key, value)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A primitive value that has passed attribute validation.
///
/// Fixed attributes of generated error types are restricted to strings,
/// numbers and booleans.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl AttributeValue {
    /// Returns the name of the runtime kind of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "string",
            AttributeValue::Number(_) => "number",
            AttributeValue::Boolean(_) => "boolean",
        }
    }

    /// Narrows a [`Value`] down to a primitive, if it is one.
    ///
    /// Only the kind is checked here; string contents are left to the
    /// caller.
    pub fn from_primitive(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(AttributeValue::String(s.clone())),
            Value::Number(n) => Some(AttributeValue::Number(*n)),
            Value::Bool(b) => Some(AttributeValue::Boolean(*b)),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Number(n) => write_number(f, *n),
            AttributeValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::String(s) => Value::String(s),
            AttributeValue::Number(n) => Value::Number(n),
            AttributeValue::Boolean(b) => Value::Bool(b),
        }
    }
}

impl PartialEq<Value> for AttributeValue {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (AttributeValue::String(a), Value::String(b)) => a == b,
            (AttributeValue::Number(a), Value::Number(b)) => a == b,
            (AttributeValue::Boolean(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}
