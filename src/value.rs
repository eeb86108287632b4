//! The stored data model: terminal scalars, ordered mappings, and ordered
//! sequences, with children held behind shared handles so that every node
//! over a subtree observes mutation through any other node immediately.
//!
//! [`RawValue`] is the only persistent state in this crate. Nodes are
//! transient views over a [`RawRef`] and never copy the data they wrap.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::path::Attributes;

/// A shared, interior-mutable handle to a [`RawValue`].
///
/// Cloning a `RawRef` bumps a reference count; it never copies the value.
pub type RawRef = Rc<RefCell<RawValue>>;

/// A terminal leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Scalar {
    fn from_number(n: &Number) -> Self {
        match n.as_i64() {
            Some(i) => Scalar::Int(i),
            // u64 beyond i64::MAX and every float
            None => Scalar::Float(n.as_f64().unwrap_or_default()),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Int(i) => Value::Number(Number::from(*i)),
            Scalar::Float(x) => Number::from_f64(*x).map(Value::Number).unwrap_or(Value::Null),
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Null => Value::Null,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "'{s}'"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Nested data as stored: a scalar leaf, an ordered string-keyed mapping,
/// or an ordered sequence. Mapping and sequence children sit behind
/// [`RawRef`] handles, so subtrees are shared rather than owned by their
/// parent alone.
#[derive(Debug, PartialEq)]
pub enum RawValue {
    Scalar(Scalar),
    Mapping(IndexMap<String, RawRef>),
    Sequence(Vec<RawRef>),
}

impl RawValue {
    /// Moves this value into a fresh shared handle.
    pub fn shared(self) -> RawRef {
        Rc::new(RefCell::new(self))
    }

    /// Converts a parsed JSON document into the stored representation.
    /// Key order and element order are preserved.
    pub fn from_json(value: Value) -> RawValue {
        match value {
            Value::Null => RawValue::Scalar(Scalar::Null),
            Value::Bool(b) => RawValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => RawValue::Scalar(Scalar::from_number(&n)),
            Value::String(s) => RawValue::Scalar(Scalar::String(s)),
            Value::Array(elements) => RawValue::Sequence(
                elements
                    .into_iter()
                    .map(|v| RawValue::from_json(v).shared())
                    .collect(),
            ),
            Value::Object(entries) => RawValue::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, RawValue::from_json(v).shared()))
                    .collect(),
            ),
        }
    }

    /// Serializes the current state of this value back into JSON,
    /// preserving mapping key order and sequence element order.
    pub fn to_json(&self) -> Value {
        match self {
            RawValue::Scalar(s) => s.to_json(),
            RawValue::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.borrow().to_json()))
                    .collect(),
            ),
            RawValue::Sequence(elements) => {
                Value::Array(elements.iter().map(|e| e.borrow().to_json()).collect())
            }
        }
    }

    /// Superset match: true when this value is a mapping that carries every
    /// key of `attrs` with an equal scalar value. Extra keys are ignored.
    /// Anything other than a mapping never matches.
    pub fn matches(&self, attrs: &Attributes) -> bool {
        let RawValue::Mapping(entries) = self else {
            return false;
        };

        attrs.iter().all(|(key, expected)| {
            entries.get(key).is_some_and(
                |child| matches!(&*child.borrow(), RawValue::Scalar(s) if s == expected),
            )
        })
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        RawValue::from_json(value)
    }
}

impl From<Scalar> for RawValue {
    fn from(s: Scalar) -> Self {
        RawValue::Scalar(s)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Scalar(Scalar::from(s))
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Scalar(Scalar::from(s))
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Scalar(Scalar::from(i))
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Scalar(Scalar::from(x))
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Scalar(Scalar::from(b))
    }
}
