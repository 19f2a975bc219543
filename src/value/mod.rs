//! Dynamic values flowing through partially applied and composed functions.
//!
//! Rust functions are statically typed, while the partial-application engine
//! has to accept arguments one call at a time and keep them until the wrapped
//! function is ready. [`Value`] is the common currency for that: every
//! argument, bound slot, and result is a `Value`.
//!
//! # Overview
//!
//! - [`Value`]: the dynamic value itself
//! - [`Keywords`]: an insertion-ordered map from parameter names to values
//! - [`Sequence`]: a lazy, pull-based stream of values shared between holders
//! - [`IntoValue`] / [`FromValue`]: conversions to and from Rust types
//!
//! # Examples
//!
//! ```rust
//! use pointfree::{FromValue, IntoValue, Value};
//!
//! let value = 42_i64.into_value();
//! assert_eq!(value, Value::Int(42));
//! assert_eq!(i64::from_value(value), Ok(42));
//! ```

mod convert;
mod keywords;
mod sequence;

use std::fmt;

pub use convert::{FromValue, IntoValue, TypeMismatch};
pub use keywords::Keywords;
pub use sequence::Sequence;

use crate::engine::Arguments;
use crate::error::CallError;
use crate::function::Function;

/// A dynamically typed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absence of a value. Returned by functions without a result.
    #[default]
    Unit,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An eagerly materialized list.
    List(Vec<Value>),
    /// An ordered name-to-value map, as collected by a keyword-rest parameter.
    Map(Keywords),
    /// A callable.
    Function(Function),
    /// A lazy sequence.
    Sequence(Sequence),
}

impl Value {
    /// Returns the name of this value's type, as used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Function(_) => "function",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns `true` for [`Value::Unit`].
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Returns the integer payload, if any.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the function payload, if any.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Calls this value.
    ///
    /// Lets a chain of partial applications be written without unpacking each
    /// intermediate result.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::NotCallable`] when the value is not a function,
    /// otherwise whatever the function's call returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointfree::{args, partial, Function, Signature, Value};
    ///
    /// let signature = Signature::builder("add")
    ///     .positional("a")
    ///     .positional("b")
    ///     .build()
    ///     .unwrap();
    /// let add = partial(Function::define(signature, |frame| {
    ///     Ok(Value::Int(frame.argument::<i64>("a")? + frame.argument::<i64>("b")?))
    /// }))
    /// .unwrap();
    ///
    /// let result = add.call(args![3]).unwrap().call(args![5]).unwrap();
    /// assert_eq!(result, Value::Int(8));
    /// ```
    pub fn call(&self, arguments: Arguments) -> Result<Self, CallError> {
        match self {
            Self::Function(function) => function.call(arguments),
            other => Err(CallError::NotCallable {
                found: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(formatter, "()"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write!(formatter, "{number}"),
            Self::Str(text) => write!(formatter, "{text}"),
            Self::List(items) => {
                write!(formatter, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write_nested(formatter, item)?;
                }
                write!(formatter, "]")
            }
            Self::Map(keywords) => {
                write!(formatter, "{{")?;
                for (index, (name, item)) in keywords.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{name}: ")?;
                    write_nested(formatter, item)?;
                }
                write!(formatter, "}}")
            }
            Self::Function(function) => write!(formatter, "<function {}>", function.name()),
            Self::Sequence(_) => write!(formatter, "<sequence>"),
        }
    }
}

// Strings inside containers are quoted so `["a, b"]` and `["a", "b"]` differ.
fn write_nested(formatter: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Str(text) => write!(formatter, "{text:?}"),
        other => write!(formatter, "{other}"),
    }
}
