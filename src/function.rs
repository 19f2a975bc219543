//! Callable values.
//!
//! [`Callable`] is the single seam every callable implements; [`Function`] is
//! a cheap, cloneable handle to one. The concrete callables are:
//!
//! - opaque natives built with [`Function::native`], which take raw
//!   [`Arguments`] and carry no signature
//! - definitions built with [`Function::define`], which carry a
//!   [`Signature`] and are called strictly
//! - [`Partial`], which accumulates arguments across calls
//! - [`Pointfree`](crate::Pointfree) and [`Composed`](crate::Composed), which
//!   add composition on top

use std::fmt;
use std::sync::Arc;

use crate::compose::{Composed, Pointfree};
use crate::engine::{Arguments, Frame, Partial, Signature};
use crate::error::CallError;
use crate::value::Value;

/// The outcome of applying arguments to a callable.
#[derive(Debug, Clone, PartialEq)]
pub enum Application {
    /// The callable ran and produced a value.
    Complete(Value),
    /// Required arguments are still missing; the function accepts the rest.
    Pending(Function),
}

impl Application {
    /// Returns `true` when more arguments are needed.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the result as a value; a pending function becomes [`Value::Function`].
    pub fn into_value(self) -> Value {
        match self {
            Self::Complete(value) => value,
            Self::Pending(function) => Value::Function(function),
        }
    }

    /// Returns the completed value, if the callable ran.
    pub fn into_complete(self) -> Option<Value> {
        match self {
            Self::Complete(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// Returns the pending function, if arguments are still missing.
    pub fn into_pending(self) -> Option<Function> {
        match self {
            Self::Complete(_) => None,
            Self::Pending(function) => Some(function),
        }
    }
}

/// A value that can be called with [`Arguments`].
pub trait Callable: Send + Sync {
    /// Returns the callable's name.
    fn name(&self) -> &str;

    /// Returns the declared signature, or `None` for opaque callables.
    fn signature(&self) -> Option<&Signature>;

    /// Applies `arguments`.
    ///
    /// # Errors
    ///
    /// Binding errors raised by the callable, or any error its body raises.
    fn apply(&self, arguments: Arguments) -> Result<Application, CallError>;

    /// Returns this callable as a [`Partial`], if it is one.
    fn as_partial(&self) -> Option<&Partial> {
        None
    }

    /// Returns this callable as a [`Pointfree`], if it is one.
    fn as_pointfree(&self) -> Option<&Pointfree> {
        None
    }

    /// Returns this callable as a [`Composed`] node, if it is one.
    fn as_composed(&self) -> Option<&Composed> {
        None
    }
}

type NativeBody = dyn Fn(Arguments) -> Result<Value, CallError> + Send + Sync;
type DefinitionBody = dyn Fn(Frame) -> Result<Value, CallError> + Send + Sync;

struct Native {
    name: String,
    body: Box<NativeBody>,
}

impl Callable for Native {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> Option<&Signature> {
        None
    }

    fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        (self.body)(arguments).map(Application::Complete)
    }
}

struct Definition {
    signature: Signature,
    body: Box<DefinitionBody>,
}

impl Callable for Definition {
    fn name(&self) -> &str {
        self.signature.name()
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }

    fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        let frame = Frame::bind(&self.signature, arguments)?;
        (self.body)(frame).map(Application::Complete)
    }
}

/// A shared handle to a [`Callable`].
///
/// Equality is identity: two handles are equal when they point at the same
/// callable.
#[derive(Clone)]
pub struct Function(Arc<dyn Callable>);

impl Function {
    /// Wraps a callable.
    pub fn new<C: Callable + 'static>(callable: C) -> Self {
        Self(Arc::new(callable))
    }

    /// Creates an opaque callable that receives raw arguments.
    ///
    /// Opaque callables can be composed but not partially applied, since
    /// they expose no parameter list.
    pub fn native<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Arguments) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::new(Native {
            name: name.into(),
            body: Box::new(body),
        })
    }

    /// Creates a callable with a declared signature.
    ///
    /// Calling it directly is a strict call: every required parameter must
    /// be supplied at once. Wrap it with [`partial`](crate::partial) or
    /// [`pointfree`](crate::pointfree) to accumulate arguments instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pointfree::{args, CallError, Function, Signature, Value};
    ///
    /// let signature = Signature::builder("negate").positional("x").build().unwrap();
    /// let negate = Function::define(signature, |frame| {
    ///     Ok(Value::Int(-frame.argument::<i64>("x")?))
    /// });
    ///
    /// assert_eq!(negate.call(args![4]).unwrap(), Value::Int(-4));
    /// assert!(matches!(
    ///     negate.call(args![]),
    ///     Err(CallError::MissingArguments { .. })
    /// ));
    /// ```
    pub fn define<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(Frame) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::new(Definition {
            signature,
            body: Box::new(body),
        })
    }

    /// Returns the callable's name.
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Returns the declared signature, or `None` for opaque callables.
    pub fn signature(&self) -> Option<&Signature> {
        self.0.signature()
    }

    /// Applies `arguments`, reporting whether the callable ran.
    ///
    /// # Errors
    ///
    /// Whatever the callable raises.
    pub fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        self.0.apply(arguments)
    }

    /// Calls the function; a pending result comes back as [`Value::Function`].
    ///
    /// # Errors
    ///
    /// Whatever the callable raises.
    pub fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        self.apply(arguments).map(Application::into_value)
    }

    /// Returns the underlying [`Partial`], if this is one.
    pub fn as_partial(&self) -> Option<&Partial> {
        self.0.as_partial()
    }

    /// Returns the underlying [`Pointfree`], if this is one.
    pub fn as_pointfree(&self) -> Option<&Pointfree> {
        self.0.as_pointfree()
    }

    /// Returns the underlying [`Composed`] node, if this is one.
    pub fn as_composed(&self) -> Option<&Composed> {
        self.0.as_composed()
    }

    /// Returns `true` when both handles point at the same callable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Prepares an operand for composition.
    ///
    /// Engine-wrapped callables and opaque natives are used as they are; a bare
    /// introspectable callable is wrapped in the partial engine first.
    pub(crate) fn into_composable(self) -> Self {
        if self.as_partial().is_some()
            || self.as_pointfree().is_some()
            || self.as_composed().is_some()
        {
            return self;
        }
        match self.signature().cloned() {
            Some(signature) => Partial::with_signature(self, signature).into(),
            None => self,
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Function").field(&self.name()).finish()
    }
}

impl From<&Self> for Function {
    fn from(function: &Self) -> Self {
        function.clone()
    }
}
