//! Argument accumulation and auto-invocation.
//!
//! This module holds the partial-application engine:
//!
//! - [`Signature`]: the declared parameter list of a callable
//! - [`Arguments`]: the arguments of a single call
//! - [`BindingState`]: the arguments accumulated across calls
//! - [`Frame`]: the fully resolved arguments handed to a function body
//! - [`Partial`]: a callable plus its binding state
//!
//! A [`Partial`] decides on every call whether the wrapped function can run.
//! Readiness depends only on required parameters: positional parameters
//! without a default that are neither bound by position nor by keyword, and
//! keyword-only parameters without a default. Rest catch-alls never block or
//! delay invocation.

mod arguments;
mod binding;
mod frame;
mod partial;
mod signature;

pub use arguments::Arguments;
pub use binding::BindingState;
pub use frame::Frame;
pub use partial::Partial;
pub use signature::{Parameter, Signature, SignatureBuilder};
