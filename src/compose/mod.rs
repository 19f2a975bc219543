//! Point-free composition.
//!
//! This module layers composition on top of the partial-application engine.
//!
//! # Overview
//!
//! - [`Pointfree`]: a partially applicable function that composes
//! - [`Composed`]: the node produced by composing two functions
//! - [`compose!`] / [`pipe!`]: right-to-left and left-to-right chains
//! - helpers (feature `helpers`): [`map`], [`reduce`], [`collect`],
//!   [`print`], [`print_each`], [`ignore`], [`identity`], [`constant`],
//!   writing through a [`Sink`]
//!
//! # Mathematical Background
//!
//! Given `f: B -> C` and `g: A -> B`, circle-composition is
//!
//! ```text
//! (f * g)(x) = f(g(x))
//! ```
//!
//! and forward-composition reads the other way round:
//!
//! ```text
//! (g >> f)(x) = f(g(x))
//! ```
//!
//! Because every operand is partially applicable, a stage can be configured
//! by binding its leading arguments and left open on the data argument. The
//! data then flows through the chain one element at a time when the stages
//! work on lazy [`Sequence`](crate::Sequence)s.
//!
//! # Laws
//!
//! - **Associativity**: `(f * g) * h` behaves as `f * (g * h)`
//! - **Mirror**: `f * g` behaves as `g >> f`
//! - **Identity**: `identity() * f` and `f * identity()` behave as `f`
//!
//! # Examples
//!
//! ```rust
//! use pointfree::{args, Pointfree, Signature, Value};
//!
//! let unary = |name: &str| Signature::builder(name).positional("x").build().unwrap();
//! let square = Pointfree::define(unary("square"), |frame| {
//!     let x: i64 = frame.argument("x")?;
//!     Ok(Value::Int(x * x))
//! });
//! let increment = Pointfree::define(unary("increment"), |frame| {
//!     Ok(Value::Int(frame.argument::<i64>("x")? + 1))
//! });
//!
//! let square_of_successor = &square * &increment;
//! assert_eq!(square_of_successor.call(args![2]).unwrap(), Value::Int(9));
//! ```

mod compose_macro;
mod composed;
#[cfg(feature = "helpers")]
mod helpers;
mod pointfree;
#[cfg(feature = "helpers")]
mod sink;

pub use composed::Composed;
#[cfg(feature = "helpers")]
pub use helpers::{collect, constant, identity, ignore, map, print, print_each, reduce};
pub use pointfree::Pointfree;
#[cfg(feature = "helpers")]
pub use sink::Sink;

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::compose;
pub use crate::pipe;
