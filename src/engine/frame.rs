//! Fully resolved arguments handed to a function body.

use super::arguments::Arguments;
use super::binding::BindingState;
use super::signature::Signature;
use crate::error::CallError;
use crate::value::{FromValue, Keywords, TypeMismatch, Value};

/// The arguments of one invocation, resolved against a [`Signature`].
///
/// Every declared parameter has a value: the bound argument or, failing
/// that, its default. Extra positional arguments sit in the rest list and
/// extra keywords in the keyword-rest map.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, Frame, Signature, Value};
///
/// let signature = Signature::builder("scale")
///     .positional("value")
///     .optional("factor", 2_i64)
///     .build()
///     .unwrap();
///
/// let frame = Frame::bind(&signature, args![21]).unwrap();
/// assert_eq!(frame.argument::<i64>("value").unwrap(), 21);
/// assert_eq!(frame.argument::<i64>("factor").unwrap(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Frame {
    function: String,
    values: Keywords,
    rest_name: Option<String>,
    rest: Vec<Value>,
    keywords_name: Option<String>,
    extra: Keywords,
}

impl Frame {
    pub(crate) fn new(
        signature: &Signature,
        values: Keywords,
        rest: Vec<Value>,
        extra: Keywords,
    ) -> Self {
        Self {
            function: signature.name().to_string(),
            values,
            rest_name: signature.rest().map(str::to_string),
            rest,
            keywords_name: signature.keywords().map(str::to_string),
            extra,
        }
    }

    /// Binds `arguments` in one strict call.
    ///
    /// This is the ordinary call convention: the same validation as a partial
    /// application, but every required parameter must be present.
    ///
    /// # Errors
    ///
    /// Any binding error from [`BindingState::merge`], or
    /// [`CallError::MissingArguments`].
    pub fn bind(signature: &Signature, arguments: Arguments) -> Result<Self, CallError> {
        BindingState::new()
            .merge(signature, arguments)?
            .into_frame(signature)
    }

    /// Returns the name of the function being invoked.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Returns the value of a declared parameter.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Reads a declared parameter, converting it to `T`.
    ///
    /// # Errors
    ///
    /// [`CallError::ArgumentType`] when the value has another type, and
    /// [`CallError::MissingArguments`] when no parameter is called `name`.
    pub fn argument<T: FromValue>(&self, name: &str) -> Result<T, CallError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| CallError::MissingArguments {
                function: self.function.clone(),
                names: vec![name.to_string()],
            })?;
        T::from_value(value.clone()).map_err(|mismatch| self.type_error(name, mismatch))
    }

    /// Returns the values collected by the positional-rest parameter.
    pub fn rest_values(&self) -> &[Value] {
        &self.rest
    }

    /// Reads the positional-rest values as a list converted to `T`.
    ///
    /// # Errors
    ///
    /// [`CallError::ArgumentType`] when the conversion fails.
    pub fn rest<T: FromValue>(&self) -> Result<T, CallError> {
        T::from_value(Value::List(self.rest.clone()))
            .map_err(|mismatch| self.type_error(self.rest_name.as_deref().unwrap_or("*"), mismatch))
    }

    /// Returns the keywords collected by the keyword-rest parameter.
    pub const fn extra_keywords(&self) -> &Keywords {
        &self.extra
    }

    /// Reads the keyword-rest values as a map converted to `T`.
    ///
    /// # Errors
    ///
    /// [`CallError::ArgumentType`] when the conversion fails.
    pub fn keywords<T: FromValue>(&self) -> Result<T, CallError> {
        T::from_value(Value::Map(self.extra.clone())).map_err(|mismatch| {
            self.type_error(self.keywords_name.as_deref().unwrap_or("**"), mismatch)
        })
    }

    fn type_error(&self, parameter: &str, mismatch: TypeMismatch) -> CallError {
        CallError::ArgumentType {
            function: self.function.clone(),
            parameter: parameter.to_string(),
            expected: mismatch.expected,
            found: mismatch.found,
        }
    }
}
