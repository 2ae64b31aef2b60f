//! Property values and their normalization for the native boundary.
//!
//! A [`PropertyValue`] is what callers hand to a component. Before it crosses
//! into native code it is normalized against the [`PropertyType`] declared for
//! its key, which performs the coercions the native side relies on (integers
//! widened to floats, level tokens mapped to their native integer, and so on).

pub mod level;

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use level::{OutputLevel, ParseLevelError};

/// Dynamically typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i64),
    Float(f64),
    String(String),
    Bool(bool),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::List(_) => "list",
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::String(s) => write!(f, "{:?}", s),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(v: $ty) -> Self {
                    PropertyValue::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_primitive!(
    i32 => Integer as i64,
    i64 => Integer as i64,
    u32 => Integer as i64,
    f32 => Float as f64,
    f64 => Float as f64,
);

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(v: Vec<T>) -> Self {
        PropertyValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<toml::Value> for PropertyValue {
    type Error = crate::Error;

    fn try_from(value: toml::Value) -> Result<Self, Self::Error> {
        match value {
            toml::Value::Integer(i) => Ok(PropertyValue::Integer(i)),
            toml::Value::Float(f) => Ok(PropertyValue::Float(f)),
            toml::Value::String(s) => Ok(PropertyValue::String(s)),
            toml::Value::Boolean(b) => Ok(PropertyValue::Bool(b)),
            toml::Value::Array(items) => items
                .into_iter()
                .map(PropertyValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(PropertyValue::List),
            other => Err(crate::config_err!(
                "unsupported property value type: {}",
                other.type_str()
            )),
        }
    }
}

/// Type the native side expects for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Int,
    Float,
    Bool,
    Level,
    List(&'static PropertyType),
}

impl PropertyType {
    /// Coerce `value` into the native representation for this type.
    ///
    /// Returns `None` when the value cannot represent this type.
    pub fn normalize(&self, value: &PropertyValue) -> Option<Value> {
        match (self, value) {
            (PropertyType::String, PropertyValue::String(s)) => Some(Value::String(s.clone())),
            (PropertyType::Int, PropertyValue::Integer(i)) => Some(Value::from(*i)),
            (PropertyType::Float, PropertyValue::Float(f)) => {
                serde_json::Number::from_f64(*f).map(Value::Number)
            }
            (PropertyType::Float, PropertyValue::Integer(i)) => {
                serde_json::Number::from_f64(*i as f64).map(Value::Number)
            }
            (PropertyType::Bool, PropertyValue::Bool(b)) => Some(Value::Bool(*b)),
            (PropertyType::Bool, PropertyValue::Integer(0)) => Some(Value::Bool(false)),
            (PropertyType::Bool, PropertyValue::Integer(1)) => Some(Value::Bool(true)),
            (PropertyType::Level, v) => OutputLevel::try_from(v)
                .ok()
                .map(|level| Value::from(level.as_native())),
            (PropertyType::List(inner), PropertyValue::List(items)) => items
                .iter()
                .map(|item| inner.normalize(item))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            _ => None,
        }
    }
}

impl Display for PropertyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::String => f.write_str("string"),
            PropertyType::Int => f.write_str("int"),
            PropertyType::Float => f.write_str("float"),
            PropertyType::Bool => f.write_str("bool"),
            PropertyType::Level => f.write_str("output level"),
            PropertyType::List(inner) => write!(f, "list of {}", inner),
        }
    }
}
