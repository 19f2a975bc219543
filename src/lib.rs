//! # pointfree
//!
//! Automatic partial application and point-free composition.
//!
//! ## Overview
//!
//! A function wrapped by this library accepts its arguments over any number
//! of calls. It runs on the call that supplies its last required parameter;
//! until then every call returns a new function waiting for the rest.
//! Wrapped functions also compose:
//!
//! - **Partial application**: [`Partial`], [`partial`]
//! - **Composition**: [`Pointfree`], [`pointfree`] / [`pf`], the `>>` and `*`
//!   operators, [`compose!`] and [`pipe!`]
//! - **Sequence helpers**: [`map`], [`reduce`], [`collect`], [`print_each`]
//!   and friends, working on lazy [`Sequence`]s
//! - **Attribute macros**: `#[partial]`, `#[pointfree]` and `#[pf]` derive a
//!   [`Signature`] from an ordinary `fn`
//!
//! Arguments and results travel as dynamic [`Value`]s; [`IntoValue`] and
//! [`FromValue`] convert to and from Rust types.
//!
//! ## Feature Flags
//!
//! - `derive`: the attribute macros (enabled by default)
//! - `helpers`: sequence helpers and [`Sink`] (enabled by default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use pointfree::prelude::*;
//!
//! #[pointfree]
//! fn add3(a: i64, b: i64, c: i64) -> i64 {
//!     a + b + c
//! }
//!
//! let add = add3();
//! let step = add.bind(args![1]).unwrap().bind(args![2]).unwrap();
//! assert_eq!(step.call(args![3]).unwrap(), Value::Int(6));
//! assert_eq!(add.call(args![1, 2, 3]).unwrap(), Value::Int(6));
//!
//! #[pointfree]
//! fn square(x: i64) -> i64 {
//!     x * x
//! }
//!
//! #[pointfree]
//! fn increment(x: i64) -> i64 {
//!     x + 1
//! }
//!
//! assert_eq!((square() * increment()).call(args![2]).unwrap(), Value::Int(9));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, traits and macros.
///
/// # Usage
///
/// ```rust
/// use pointfree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::args;
    pub use crate::compose::{Composed, Pointfree, compose, pipe};
    pub use crate::engine::{Arguments, Frame, Partial, Signature};
    pub use crate::error::CallError;
    pub use crate::function::{Application, Callable, Function};
    pub use crate::value::{FromValue, IntoValue, Keywords, Sequence, Value};
    pub use crate::{partial, pf, pointfree};

    #[cfg(feature = "helpers")]
    pub use crate::compose::{
        Sink, collect, constant, identity, ignore, map, print, print_each, reduce,
    };
}

pub mod compose;
pub mod engine;
mod error;
mod function;
pub mod value;

pub use compose::{Composed, Pointfree};
#[cfg(feature = "helpers")]
pub use compose::{Sink, collect, constant, identity, ignore, map, print, print_each, reduce};
pub use engine::{Arguments, BindingState, Frame, Parameter, Partial, Signature, SignatureBuilder};
pub use error::{CallError, SignatureError};
pub use function::{Application, Callable, Function};
pub use value::{FromValue, IntoValue, Keywords, Sequence, TypeMismatch, Value};

/// Attribute macros deriving a [`Signature`] from an ordinary `fn`.
///
/// See the `pointfree-derive` crate for the supported parameter attributes.
#[cfg(feature = "derive")]
pub use pointfree_derive::{partial, pf, pointfree};

/// Wraps a callable in the partial-application engine.
///
/// # Errors
///
/// [`CallError::Introspection`] when the callable exposes no signature.
pub fn partial(function: impl Into<Function>) -> Result<Partial, CallError> {
    Partial::wrap(function)
}

/// Wraps a callable so that it can be partially applied and composed.
///
/// # Errors
///
/// [`CallError::Introspection`] when the callable exposes no signature.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, pointfree, CallError, Function, Signature, Value};
///
/// let signature = Signature::builder("mult").positional("a").positional("b").build().unwrap();
/// let mult = Function::define(signature, |frame| {
///     Ok(Value::Int(frame.argument::<i64>("a")? * frame.argument::<i64>("b")?))
/// });
///
/// let mult = pointfree(mult).unwrap();
/// let triple = mult.bind(args![3]).unwrap();
/// assert_eq!(triple.call(args![7]).unwrap(), Value::Int(21));
///
/// let opaque = Function::native("opaque", |_| Ok(Value::Unit));
/// assert!(matches!(pointfree(opaque), Err(CallError::Introspection { .. })));
/// ```
pub fn pointfree(function: impl Into<Function>) -> Result<Pointfree, CallError> {
    Pointfree::wrap(function)
}

/// Short alias for [`pointfree()`].
///
/// # Errors
///
/// See [`pointfree()`].
pub fn pf(function: impl Into<Function>) -> Result<Pointfree, CallError> {
    Pointfree::wrap(function)
}
