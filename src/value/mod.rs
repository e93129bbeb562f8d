//! The dynamic value model.
//!
//! Every wrapped callable speaks one calling convention: it receives an
//! [`Arguments`] bundle of [`Value`]s and returns `Result<Value, CallError>`.
//! This lets a single wrapper type compose, pipe, partially apply and curry
//! callables of any shape.
//!
//! # Overview
//!
//! - [`Value`]: a dynamically typed value (including functions and the
//!   placeholder marker)
//! - [`FromValue`]: typed extraction out of a [`Value`]
//! - [`Arguments`]: positional and keyword arguments of a call
//! - [`args!`](crate::args): builds an [`Arguments`] bundle
//!
//! # Examples
//!
//! ```rust
//! use sidekick::{Value, FromValue};
//!
//! let value = Value::from(42);
//! assert_eq!(value.type_name(), "int");
//! assert_eq!(i64::from_value(value).unwrap(), 42);
//! ```

mod arguments;

pub use arguments::Arguments;

use std::fmt;
use std::sync::Arc;

use crate::compose::{Func, Placeholder};
use crate::error::CallError;

/// A dynamically typed value passed to and returned from wrapped callables.
///
/// Function values compare by identity: two [`Value::Func`] values are equal
/// only when they share the same underlying callable.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absence of a value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    Str(Arc<str>),
    /// A list of values.
    List(Vec<Value>),
    /// A function.
    Func(Func),
    /// The placeholder marker used by partial application.
    Placeholder,
}

impl Value {
    /// Returns a short name for the type of this value.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Func(_) => "function",
            Self::Placeholder => "placeholder",
        }
    }

    /// Returns `true` if this value is the placeholder marker.
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Returns `true` if this value is [`Value::None`].
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the boolean if this value is a [`Value::Bool`].
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer if this value is a [`Value::Int`].
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number as a float if this value is a [`Value::Float`] or
    /// a [`Value::Int`].
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the string slice if this value is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(&**value),
            _ => None,
        }
    }

    /// Returns the elements if this value is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Returns the function if this value is a [`Value::Func`].
    pub const fn as_func(&self) -> Option<&Func> {
        match self {
            Self::Func(function) => Some(function),
            _ => None,
        }
    }

    /// Calls this value as a function.
    ///
    /// This is what makes curried chains read naturally:
    /// `curried.call(args![1])?.call(args![2])?`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::TypeMismatch`] if this value is not a function,
    /// otherwise whatever the function returns.
    pub fn call(&self, arguments: Arguments) -> Result<Self, CallError> {
        match self {
            Self::Func(function) => function.call(arguments),
            other => Err(CallError::TypeMismatch {
                expected: "function",
                found: other.type_name(),
            }),
        }
    }

    /// Calls this value as a function with a single positional argument.
    ///
    /// # Errors
    ///
    /// See [`Value::call`].
    pub fn call1(&self, argument: impl Into<Self>) -> Result<Self, CallError> {
        self.call(Arguments::from_positional([argument.into()]))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(formatter, "None"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::Str(value) => write!(formatter, "{:?}", &**value),
            Self::List(values) => {
                write!(formatter, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{value}")?;
                }
                write!(formatter, "]")
            }
            Self::Func(function) => write!(formatter, "{function}"),
            Self::Placeholder => write!(formatter, "__"),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl From<Func> for Value {
    fn from(function: Func) -> Self {
        Self::Func(function)
    }
}

impl From<Placeholder> for Value {
    fn from(_: Placeholder) -> Self {
        Self::Placeholder
    }
}

/// Extracts a typed Rust value out of a [`Value`].
///
/// Used by callables to read their arguments and by the
/// [`#[function]`](crate::function) attribute to convert bound arguments
/// into the declared parameter types.
///
/// # Examples
///
/// ```rust
/// use sidekick::{CallError, FromValue, Value};
///
/// assert_eq!(String::from_value(Value::from("hi")).unwrap(), "hi");
/// assert_eq!(
///     bool::from_value(Value::from(1)),
///     Err(CallError::TypeMismatch { expected: "bool", found: "int" })
/// );
/// ```
pub trait FromValue: Sized {
    /// Converts the value.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::TypeMismatch`] when the value has another type.
    fn from_value(value: Value) -> Result<Self, CallError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, CallError> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::Bool(inner) => Ok(inner),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::Int(inner) => Ok(inner),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::Int(inner) => Self::try_from(inner).map_err(|_| CallError::TypeMismatch {
                expected: "i32",
                found: "int",
            }),
            other => Err(mismatch("i32", &other)),
        }
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::Int(inner) => Self::try_from(inner).map_err(|_| CallError::TypeMismatch {
                expected: "u32",
                found: "int",
            }),
            other => Err(mismatch("u32", &other)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, CallError> {
        value.as_float().ok_or_else(|| mismatch("float", &value))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::Str(inner) => Ok(inner.to_string()),
            other => Err(mismatch("str", &other)),
        }
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::List(values) => Ok(values),
            other => Err(mismatch("list", &other)),
        }
    }
}

impl FromValue for Func {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::Func(function) => Ok(function),
            other => Err(mismatch("function", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, CallError> {
        match value {
            Value::None => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

const fn mismatch(expected: &'static str, found: &Value) -> CallError {
    CallError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::None, "None")]
    #[case(Value::from(true), "true")]
    #[case(Value::from(-3), "-3")]
    #[case(Value::from(1.5), "1.5")]
    #[case(Value::from(2.0), "2.0")]
    #[case(Value::from("a"), "\"a\"")]
    #[case(Value::from(vec![1, 2]), "[1, 2]")]
    #[case(Value::Placeholder, "__")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(format!("{value}"), expected);
    }

    #[rstest]
    fn test_option_conversions() {
        assert_eq!(Value::from(None::<i64>), Value::None);
        assert_eq!(Option::<i64>::from_value(Value::None), Ok(None));
        assert_eq!(Option::<i64>::from_value(Value::from(4)), Ok(Some(4)));
    }

    #[rstest]
    fn test_float_accepts_int() {
        assert_eq!(f64::from_value(Value::from(3)), Ok(3.0));
    }

    #[rstest]
    fn test_i32_out_of_range_is_mismatch() {
        let result = i32::from_value(Value::Int(i64::MAX));
        assert_eq!(
            result,
            Err(CallError::TypeMismatch {
                expected: "i32",
                found: "int"
            })
        );
    }

    #[rstest]
    fn test_call_on_non_function_fails() {
        let result = Value::from(1).call1(2);
        assert_eq!(
            result,
            Err(CallError::TypeMismatch {
                expected: "function",
                found: "int"
            })
        );
    }
}
