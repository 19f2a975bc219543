//! The partial-application engine.

use std::fmt;
use std::sync::Arc;

use super::arguments::Arguments;
use super::binding::BindingState;
use super::frame::Frame;
use super::signature::Signature;
use crate::error::CallError;
use crate::function::{Application, Callable, Function};
use crate::value::Value;

/// A callable together with the arguments bound to it so far.
///
/// Each call merges its arguments into a fresh [`BindingState`]. Once every
/// required parameter is bound, the underlying function is invoked on that
/// same call; until then the call returns a new `Partial` holding the merged
/// state. The parent is never modified, so a `Partial` can be reused as the
/// root of any number of independent chains.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, Function, Partial, Signature, Value};
///
/// let signature = Signature::builder("add3")
///     .positional("a")
///     .positional("b")
///     .positional("c")
///     .build()
///     .unwrap();
/// let add3 = Partial::define(signature, |frame| {
///     let sum: i64 = ["a", "b", "c"]
///         .iter()
///         .map(|name| frame.argument::<i64>(name))
///         .sum::<Result<_, _>>()?;
///     Ok(Value::Int(sum))
/// });
///
/// let add1 = add3.call(args![1]).unwrap();
/// let add1 = add1.as_function().unwrap();
/// let add3_then = add1.call(args![2]).unwrap();
/// assert_eq!(add3_then.call(args![3]).unwrap(), Value::Int(6));
///
/// assert_eq!(add3.call(args![1, 2, 3]).unwrap(), Value::Int(6));
/// ```
#[derive(Clone)]
pub struct Partial {
    function: Function,
    signature: Arc<Signature>,
    state: Arc<BindingState>,
}

impl Partial {
    /// Wraps a callable in the engine.
    ///
    /// Wrapping is idempotent: a `Partial` comes back unchanged with its bound
    /// arguments, and a [`Pointfree`](crate::Pointfree) hands over its engine.
    ///
    /// # Errors
    ///
    /// [`CallError::Introspection`] when the callable exposes no signature.
    pub fn wrap(function: impl Into<Function>) -> Result<Self, CallError> {
        let function = function.into();
        if let Some(partial) = function.as_partial() {
            return Ok(partial.clone());
        }
        if let Some(pointfree) = function.as_pointfree() {
            return Self::wrap(pointfree.inner().clone());
        }
        let signature = function
            .signature()
            .cloned()
            .ok_or_else(|| CallError::Introspection {
                function: function.name().to_string(),
            })?;
        Ok(Self::with_signature(function, signature))
    }

    /// Defines a function and wraps it in one step.
    pub fn define<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(Frame) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        let function = Function::define(signature.clone(), body);
        Self::with_signature(function, signature)
    }

    pub(crate) fn with_signature(function: Function, signature: Signature) -> Self {
        tracing::trace!(
            function = signature.name(),
            required = signature.required_count(),
            "wrapped callable"
        );
        Self {
            function,
            signature: Arc::new(signature),
            state: Arc::new(BindingState::new()),
        }
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Returns the wrapped function's signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns the arguments bound so far.
    pub fn state(&self) -> &BindingState {
        &self.state
    }

    /// Returns the required parameters not yet bound.
    pub fn pending(&self) -> Vec<&str> {
        self.state.pending(&self.signature)
    }

    /// Returns the underlying function.
    pub const fn function(&self) -> &Function {
        &self.function
    }

    /// Merges `arguments` and invokes the function if it is now ready.
    ///
    /// # Errors
    ///
    /// Binding errors for this call's arguments, or whatever the function
    /// raises when invoked.
    pub fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        let state = self.state.merge(&self.signature, arguments)?;

        if state.is_ready(&self.signature) {
            tracing::trace!(
                function = self.signature.name(),
                bound = state.len(),
                "invoking"
            );
            return self.function.apply(state.into_arguments());
        }

        tracing::trace!(
            function = self.signature.name(),
            bound = state.len(),
            pending = ?state.pending(&self.signature),
            "awaiting arguments"
        );
        Ok(Application::Pending(Function::new(Self {
            function: self.function.clone(),
            signature: Arc::clone(&self.signature),
            state: Arc::new(state),
        })))
    }

    /// Calls the partial; a pending result comes back as [`Value::Function`].
    ///
    /// # Errors
    ///
    /// See [`Partial::apply`].
    pub fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        self.apply(arguments).map(Application::into_value)
    }
}

impl Callable for Partial {
    fn name(&self) -> &str {
        self.signature.name()
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }

    fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        Self::apply(self, arguments)
    }

    fn as_partial(&self) -> Option<&Partial> {
        Some(self)
    }
}

impl From<Partial> for Function {
    fn from(partial: Partial) -> Self {
        Self::new(partial)
    }
}

impl From<&Partial> for Function {
    fn from(partial: &Partial) -> Self {
        Self::new(partial.clone())
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Partial")
            .field("signature", &self.signature.to_string())
            .field("state", &self.state)
            .finish()
    }
}

static_assertions::assert_impl_all!(Partial: Send, Sync, Clone);
