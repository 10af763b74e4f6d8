use std::fmt;

use ordered_float::OrderedFloat;

macro_rules! from {
    ($to:ty, $variant:ident, $($from:ty),+) => {
        $(impl From<$from> for $to {
            fn from(value: $from) -> Self {
                Self::$variant(value.into())
            }
        })+
    };
}

/// Container for floating point bin values stored in the Aerospike database.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
#[cfg_attr(feature = "serialization", serde(untagged))]
pub enum FloatValue {
    /// 32-bit floating point number.
    F32(OrderedFloat<f32>),
    /// 64-bit floating point number.
    F64(OrderedFloat<f64>),
}

impl FloatValue {
    /// If this value is a 32-bit floating point number, return the associated `f32`. Return `None`
    /// oterwhise.
    ///
    /// ```
    /// # use windpike_txn::FloatValue;
    /// let v = FloatValue::from(5.0_f32);
    ///
    /// assert_eq!(Some(5.0), v.as_f32());
    /// assert_eq!(None, v.as_f64());
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(value) => Some(value.0),
            Self::F64(_) => None,
        }
    }

    /// If this value is a 64-bit floating point number, return the associated `f64`. Return `None`
    /// oterwhise.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(_) => None,
            Self::F64(value) => Some(value.0),
        }
    }
}

from!(FloatValue, F32, f32);
from!(FloatValue, F64, f64);

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::F32(value) => fmt::Display::fmt(&value, f),
            Self::F64(value) => fmt::Display::fmt(&value, f),
        }
    }
}

/// Container for bin values stored in the Aerospike database.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
#[cfg_attr(feature = "serialization", serde(untagged))]
pub enum Value {
    /// Empty value. Writing it to a bin removes the bin.
    #[default]
    Nil,
    /// Boolean value.
    Bool(bool),
    /// Integer value. All integers are represented as 64-bit numerics in Aerospike.
    Int(i64),
    /// Unsigned integer value. The largest integer value that can be stored in a record bin is
    /// `i64::max_value()`; however the list and map data types can store integer values (and
    /// keys) up to `u64::max_value()`.
    Uint(u64),
    /// Floating point value.
    Float(FloatValue),
    /// String value.
    String(String),
    /// Byte array value.
    Blob(Vec<u8>),
    /// List data type is an ordered collection of values.
    List(Vec<Value>),
}

impl Value {
    /// Returns true if this value is the empty value (nil).
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// If this value is a 64-bit signed integer, return the associated `i64`. Return `None`
    /// oterwhise.
    ///
    /// ```
    /// # use windpike_txn::Value;
    /// let v = Value::from(10_i64);
    ///
    /// assert_eq!(Some(10), v.as_i64());
    /// assert_eq!(None, Value::from("ten").as_i64());
    /// ```
    #[inline]
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// If this value is a string, return the associated `&str`. Return `None` oterwhise.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

from!(Value, Bool, bool);
from!(Value, Int, i8, i16, i32, i64, u8, u16, u32);
from!(Value, Uint, u64);
from!(Value, Float, f32, f64, FloatValue);
from!(Value, String, String, &str);
from!(Value, Blob, Vec<u8>, &[u8]);
from!(Value, List, Vec<Value>);

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<null>"),
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Int(value) => fmt::Display::fmt(value, f),
            Self::Uint(value) => fmt::Display::fmt(value, f),
            Self::Float(value) => fmt::Display::fmt(value, f),
            Self::String(value) => fmt::Display::fmt(value, f),
            Self::Blob(value) => write!(f, "{value:?}"),
            Self::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(value, f)?;
                }
                f.write_str("]")
            }
        }
    }
}
