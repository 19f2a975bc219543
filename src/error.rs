//! Error types for partial application and composition.
//!
//! Every failure is reported synchronously from the call that caused it.
//! Argument validation errors are programmer errors and are never retried;
//! errors raised by a wrapped function body are propagated unchanged.

use std::sync::Arc;

use thiserror::Error;

/// Errors produced while wrapping, binding, or invoking a callable.
///
/// # Examples
///
/// ```rust
/// use pointfree::CallError;
///
/// let error = CallError::UnexpectedKeyword {
///     function: "add".to_string(),
///     name: "c".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "add() got an unexpected keyword argument 'c'"
/// );
/// ```
#[derive(Debug, Clone, Error)]
pub enum CallError {
    /// The callable carries no signature, so it cannot be partially applied.
    #[error("{function}: cannot read the parameter list of an opaque callable")]
    Introspection {
        /// Name of the opaque callable.
        function: String,
    },

    /// A keyword names no declared parameter and no keyword-rest absorbs it.
    #[error("{function}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword {
        /// Name of the callable.
        function: String,
        /// The rejected keyword.
        name: String,
    },

    /// More positional arguments than declared parameters, with no positional-rest.
    #[error("{function}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        /// Name of the callable.
        function: String,
        /// Number of declared positional parameters.
        expected: usize,
        /// Number of positional arguments bound after the call.
        given: usize,
    },

    /// A parameter was supplied twice across the chain of calls.
    #[error("{function}() got multiple values for argument '{name}'")]
    DuplicateBinding {
        /// Name of the callable.
        function: String,
        /// The parameter bound twice.
        name: String,
    },

    /// A strict call left required parameters unbound.
    #[error("{function}() missing required arguments: {}", names.join(", "))]
    MissingArguments {
        /// Name of the callable.
        function: String,
        /// The unbound required parameters, in declaration order.
        names: Vec<String>,
    },

    /// A bound value could not be converted to the type the body expects.
    #[error("{function}() argument '{parameter}' expected {expected}, found {found}")]
    ArgumentType {
        /// Name of the callable.
        function: String,
        /// The parameter being read.
        parameter: String,
        /// Expected type name.
        expected: &'static str,
        /// Actual type name of the bound value.
        found: &'static str,
    },

    /// A non-function value was called.
    #[error("'{found}' value is not callable")]
    NotCallable {
        /// Type name of the value that was called.
        found: &'static str,
    },

    /// An error raised by a function body.
    #[error("{0}")]
    Raised(Arc<dyn std::error::Error + Send + Sync>),

    /// A plain message raised by a function body.
    #[error("{0}")]
    Message(String),
}

impl CallError {
    /// Wraps an arbitrary error raised inside a function body.
    pub fn raise<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Raised(Arc::new(error))
    }

    /// Raises a plain message from a function body.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Returns `true` for the argument validation failures the engine raises itself.
    pub const fn is_binding_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedKeyword { .. }
                | Self::TooManyPositional { .. }
                | Self::DuplicateBinding { .. }
                | Self::MissingArguments { .. }
        )
    }
}

impl From<std::io::Error> for CallError {
    fn from(error: std::io::Error) -> Self {
        Self::raise(error)
    }
}

/// Errors produced while building a [`Signature`](crate::Signature).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The function name is empty.
    #[error("signature has an empty function name")]
    EmptyName,

    /// Two parameters share a name.
    #[error("{function}: duplicate parameter '{name}'")]
    DuplicateParameter {
        /// Name of the function being described.
        function: String,
        /// The repeated parameter name.
        name: String,
    },

    /// A positional parameter without a default follows one with a default.
    #[error("{function}: required parameter '{name}' follows a parameter with a default")]
    RequiredAfterOptional {
        /// Name of the function being described.
        function: String,
        /// The offending required parameter.
        name: String,
    },
}
