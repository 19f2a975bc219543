//! The composition wrapper.

use std::fmt;
use std::ops::{Mul, Shr};

use super::composed::Composed;
use crate::engine::{Arguments, Frame, Partial, Signature};
use crate::error::CallError;
use crate::function::{Application, Callable, Function};
use crate::value::Value;

/// A partially applicable function that also composes.
///
/// `Pointfree` behaves exactly like [`Partial`] when called, except that a
/// pending result is again a `Pointfree`. On top of that it composes:
///
/// - `a.then(b)` or `a >> b` runs `a` first: `(a >> b)(x) = b(a(x))`
/// - `a.of(b)` or `a * b` runs `b` first: `(a * b)(x) = a(b(x))`
///
/// The composite forwards all of its call arguments to the operand applied
/// first and hands that operand's result, as a single positional argument,
/// to the other. If the first operand is still waiting for arguments, the
/// composite is too.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, Pointfree, Signature, Value};
///
/// let unary = |name: &str| Signature::builder(name).positional("x").build().unwrap();
/// let square = Pointfree::define(unary("square"), |frame| {
///     let x: i64 = frame.argument("x")?;
///     Ok(Value::Int(x * x))
/// });
/// let increment = Pointfree::define(unary("increment"), |frame| {
///     Ok(Value::Int(frame.argument::<i64>("x")? + 1))
/// });
///
/// assert_eq!((&square * &increment).call(args![2]).unwrap(), Value::Int(9));
/// assert_eq!((&square >> &increment).call(args![2]).unwrap(), Value::Int(5));
/// ```
#[derive(Clone)]
pub struct Pointfree {
    inner: Function,
}

impl Pointfree {
    /// Wraps a callable so that it can be partially applied and composed.
    ///
    /// A `Pointfree` comes back unchanged. Partials and composites are held
    /// as they are; any other callable is wrapped in the partial engine.
    ///
    /// # Errors
    ///
    /// [`CallError::Introspection`] when the callable exposes no signature.
    pub fn wrap(function: impl Into<Function>) -> Result<Self, CallError> {
        let function = function.into();
        if let Some(pointfree) = function.as_pointfree() {
            return Ok(pointfree.clone());
        }
        if function.as_partial().is_some() || function.as_composed().is_some() {
            return Ok(Self { inner: function });
        }
        Partial::wrap(function).map(|partial| Self {
            inner: partial.into(),
        })
    }

    /// Defines a function and wraps it in one step.
    pub fn define<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(Frame) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            inner: Partial::define(signature, body).into(),
        }
    }

    pub(crate) fn from_composed(composed: Composed) -> Self {
        Self {
            inner: Function::new(composed),
        }
    }

    pub(crate) const fn inner(&self) -> &Function {
        &self.inner
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Returns the signature of the wrapped callable.
    pub fn signature(&self) -> Option<&Signature> {
        self.inner.signature()
    }

    /// Applies `arguments`; a pending result is itself a `Pointfree`.
    ///
    /// # Errors
    ///
    /// Binding errors for this call, or whatever the wrapped function raises.
    pub fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        match self.inner.apply(arguments)? {
            Application::Pending(function) => Ok(Application::Pending(adopt(function).into())),
            complete @ Application::Complete(_) => Ok(complete),
        }
    }

    /// Calls the function; a pending result comes back as [`Value::Function`].
    ///
    /// # Errors
    ///
    /// See [`Pointfree::apply`].
    pub fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        self.apply(arguments).map(Application::into_value)
    }

    /// Binds `arguments` and returns the result as a `Pointfree`.
    ///
    /// This is the usual way to configure a function before composing it:
    /// `map.bind(args![double])?` leaves the `iterable` parameter open.
    ///
    /// # Errors
    ///
    /// Binding errors for this call, [`CallError::NotCallable`] when the
    /// function ran and returned something other than a function, and
    /// [`CallError::Introspection`] when it returned an opaque one.
    pub fn bind(&self, arguments: Arguments) -> Result<Self, CallError> {
        match self.apply(arguments)? {
            Application::Pending(function) => Ok(adopt(function)),
            Application::Complete(Value::Function(function)) => Self::wrap(function),
            Application::Complete(other) => Err(CallError::NotCallable {
                found: other.type_name(),
            }),
        }
    }

    /// Composes forward: the result runs `self`, then `next`.
    #[must_use]
    pub fn then(&self, next: impl Into<Function>) -> Self {
        Self::from_composed(Composed::forward(self.clone().into(), next.into()))
    }

    /// Composes backward: the result runs `previous`, then `self`.
    #[must_use]
    pub fn of(&self, previous: impl Into<Function>) -> Self {
        Self::from_composed(Composed::circle(self.clone().into(), previous.into()))
    }
}

fn adopt(function: Function) -> Pointfree {
    match function.as_pointfree() {
        Some(pointfree) => pointfree.clone(),
        None => Pointfree { inner: function },
    }
}

impl Callable for Pointfree {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn signature(&self) -> Option<&Signature> {
        self.inner.signature()
    }

    fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        Self::apply(self, arguments)
    }

    fn as_pointfree(&self) -> Option<&Pointfree> {
        Some(self)
    }
}

impl From<Pointfree> for Function {
    fn from(pointfree: Pointfree) -> Self {
        Self::new(pointfree)
    }
}

impl From<&Pointfree> for Function {
    fn from(pointfree: &Pointfree) -> Self {
        Self::new(pointfree.clone())
    }
}

impl fmt::Debug for Pointfree {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Pointfree")
            .field(&self.inner)
            .finish()
    }
}

impl<F: Into<Function>> Shr<F> for Pointfree {
    type Output = Self;

    fn shr(self, next: F) -> Self {
        self.then(next)
    }
}

impl<F: Into<Function>> Shr<F> for &Pointfree {
    type Output = Pointfree;

    fn shr(self, next: F) -> Pointfree {
        self.then(next)
    }
}

impl<F: Into<Function>> Mul<F> for Pointfree {
    type Output = Self;

    fn mul(self, previous: F) -> Self {
        self.of(previous)
    }
}

impl<F: Into<Function>> Mul<F> for &Pointfree {
    type Output = Pointfree;

    fn mul(self, previous: F) -> Pointfree {
        self.of(previous)
    }
}

static_assertions::assert_impl_all!(Pointfree: Send, Sync, Clone);
