use std::sync::Arc;

// used to print out readable forms of a data type
use std::fmt;

// records serialize as their flattened dump
use serde::ser::{Error as _, SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

use crate::construct::Record;
use crate::error::Result;

/// The closed set of values a field can hold. Containers nest freely and a
/// value may point at another [`Record`], which is what lets a namespace
/// hold sub-namespaces (and registries hold records).
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// A plain string-keyed mapping in insertion order. Unlike a record it
    /// has no bases and takes no part in resolution.
    Map(Vec<(String, Value)>),
    Record(Arc<Record>),
}

impl Value {
    pub fn data_type(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Record(_) => "Record",
        }
    }
}

// Records compare by identity, everything else by structure.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a.thing() == b.thing(),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}
impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Int(value)
    }
}
impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Float(value)
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_owned())
    }
}
impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::String(value)
    }
}
impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Value {
        Value::List(value)
    }
}
impl From<Arc<Record>> for Value {
    fn from(value: Arc<Record>) -> Value {
        Value::Record(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                let mut s = String::new();
                for item in items {
                    s += &(item.to_string() + ", ");
                }
                s.pop();
                s.pop();
                write!(f, "[{}]", s)
            }
            Value::Map(entries) => {
                let mut s = String::new();
                for (key, value) in entries {
                    s += &format!("{}: {}, ", key, value);
                }
                s.pop();
                s.pop();
                write!(f, "{{{}}}", s)
            }
            Value::Record(record) => write!(f, "{}", record),
        }
    }
}

/// Recursively flattens a value: records become their resolved, base-free
/// map view, plain maps and lists recurse element-wise, scalars come back
/// unchanged. The result never contains a `Value::Record`, so dumping an
/// already-dumped value is a no-op.
pub fn dump(value: &Value) -> Result<Value> {
    match value {
        Value::Record(record) => record.dump(),
        Value::Map(entries) => {
            let mut dumped = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                dumped.push((key.clone(), dump(value)?));
            }
            Ok(Value::Map(dumped))
        }
        Value::List(items) => {
            let mut dumped = Vec::with_capacity(items.len());
            for item in items {
                dumped.push(dump(item)?);
            }
            Ok(Value::List(dumped))
        }
        scalar => Ok(scalar.clone()),
    }
}

// Serialization goes through the resolved view, so a JSON snapshot of a
// record is inheritance-free. A hierarchy that fails to linearize fails the
// serialization as a whole.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Record(record) => {
                let dumped = record.dump().map_err(S::Error::custom)?;
                dumped.serialize(serializer)
            }
        }
    }
}
