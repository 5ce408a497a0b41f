//! Cache Value Module
//!
//! Closed set of payloads the cache can hold, plus the coercions used by the
//! typed accessors.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

// == Value ==
/// A value stored in the cache.
///
/// Signed integers of every width are stored as `Int`, unsigned as `Uint`.
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Str(String),
    /// Arbitrary shared payload, retrieved with `downcast`.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wraps an arbitrary payload as an opaque value.
    pub fn opaque<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Opaque(Arc::new(payload))
    }

    /// Name of the variant, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Str(_) => "string",
            Value::Opaque(_) => "opaque",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads a signed integer. Only `Int` qualifies.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Reads an unsigned integer.
    ///
    /// `Int` values are reinterpreted through their two's-complement bit
    /// pattern, so `-1` reads as `u64::MAX`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) => Some(*i as u64),
            Value::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the opaque payload if it holds a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Value::Opaque(payload) => Arc::clone(payload).downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

// Opaque payloads compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// == Conversions ==
macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64, u8, u16, u32, u64, usize);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}
