//! Conversions between Rust types and [`Value`].
//!
//! [`IntoValue`] lifts a Rust value into the dynamic world; [`FromValue`]
//! reads one back out. Function bodies produced by the `#[pointfree]`
//! attribute use these traits to convert each bound argument to the declared
//! parameter type and to turn the return value into a [`Value`].

use thiserror::Error;

use super::{Keywords, Sequence, Value};
use crate::function::Function;

/// A [`Value`] had a different type than the one requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    /// Name of the requested type.
    pub expected: &'static str,
    /// Type name of the value that was supplied.
    pub found: &'static str,
}

impl TypeMismatch {
    fn of<T: FromValue>(value: &Value) -> Self {
        Self {
            expected: T::TYPE_NAME,
            found: value.type_name(),
        }
    }
}

/// Converts a Rust value into a [`Value`].
pub trait IntoValue {
    /// Performs the conversion.
    fn into_value(self) -> Value;
}

/// Extracts a Rust value from a [`Value`].
pub trait FromValue: Sized {
    /// Type name used in mismatch errors.
    const TYPE_NAME: &'static str;

    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] when `value` holds an incompatible variant.
    fn from_value(value: Value) -> Result<Self, TypeMismatch>;
}

impl IntoValue for Value {
    #[inline]
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    const TYPE_NAME: &'static str = "value";

    #[inline]
    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        Ok(value)
    }
}

macro_rules! scalar_conversions {
    ($($source:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl IntoValue for $source {
                #[inline]
                fn into_value(self) -> Value {
                    Value::$variant(<$target>::from(self))
                }
            }

            impl From<$source> for Value {
                #[inline]
                fn from(value: $source) -> Self {
                    value.into_value()
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Bool as bool,
    i64 => Int as i64,
    i32 => Int as i64,
    u32 => Int as i64,
    u8 => Int as i64,
    f64 => Float as f64,
    f32 => Float as f64,
    String => Str as String,
    &str => Str as String,
}

impl IntoValue for () {
    #[inline]
    fn into_value(self) -> Value {
        Value::Unit
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Unit, IntoValue::into_value)
    }
}

impl IntoValue for Keywords {
    #[inline]
    fn into_value(self) -> Value {
        Value::Map(self)
    }
}

impl IntoValue for Sequence {
    #[inline]
    fn into_value(self) -> Value {
        Value::Sequence(self)
    }
}

impl IntoValue for Function {
    #[inline]
    fn into_value(self) -> Value {
        Value::Function(self)
    }
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Bool(flag) => Ok(flag),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl FromValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Int(number) => Ok(number),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl FromValue for i32 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Int(number) => Self::try_from(number).map_err(|_| TypeMismatch {
                expected: "32-bit int",
                found: "int",
            }),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl FromValue for usize {
    const TYPE_NAME: &'static str = "non-negative int";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Int(number) => Self::try_from(number).map_err(|_| TypeMismatch {
                expected: Self::TYPE_NAME,
                found: "int",
            }),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "float";

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Float(number) => Ok(number),
            Value::Int(number) => Ok(number as Self),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "str";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Str(text) => Ok(text),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const TYPE_NAME: &'static str = "list";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Unit => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for Keywords {
    const TYPE_NAME: &'static str = "map";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Map(keywords) => Ok(keywords),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

impl FromValue for Function {
    const TYPE_NAME: &'static str = "function";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Function(function) => Ok(function),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

/// Lists are accepted wherever a sequence is expected and are iterated lazily.
impl FromValue for Sequence {
    const TYPE_NAME: &'static str = "sequence";

    fn from_value(value: Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Sequence(sequence) => Ok(sequence),
            Value::List(items) => Ok(Self::new(items)),
            other => Err(TypeMismatch::of::<Self>(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_int_round_trip() {
        assert_eq!(i64::from_value(42_i64.into_value()), Ok(42));
    }

    #[rstest]
    fn test_float_accepts_int() {
        assert_eq!(f64::from_value(Value::Int(3)), Ok(3.0));
    }

    #[rstest]
    fn test_mismatch_reports_both_types() {
        let error = i64::from_value(Value::Str("x".to_string())).unwrap_err();
        assert_eq!(
            error,
            TypeMismatch {
                expected: "int",
                found: "str"
            }
        );
        assert_eq!(error.to_string(), "expected int, found str");
    }

    #[rstest]
    #[case(Value::Unit, None)]
    #[case(Value::Int(7), Some(7))]
    fn test_option_treats_unit_as_none(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(Option::<i64>::from_value(value), Ok(expected));
    }

    #[rstest]
    fn test_usize_rejects_negative() {
        assert!(usize::from_value(Value::Int(-1)).is_err());
    }

    #[rstest]
    fn test_vec_converts_each_item() {
        let value = vec![1_i64, 2, 3].into_value();
        assert_eq!(Vec::<i64>::from_value(value), Ok(vec![1, 2, 3]));

        let mixed = Value::List(vec![Value::Int(1), Value::Bool(true)]);
        assert!(Vec::<i64>::from_value(mixed).is_err());
    }

    #[rstest]
    fn test_list_converts_to_sequence() {
        let sequence = Sequence::from_value(vec!["a", "b"].into_value()).unwrap();
        let items: Vec<Value> = sequence.map(Result::unwrap).collect();
        assert_eq!(items, vec![Value::from("a"), Value::from("b")]);
    }
}
