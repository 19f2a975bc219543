//! Attribute macros for pointfree.
//!
//! Rust has no runtime reflection of parameter lists, so these attributes
//! read the declaration of an ordinary `fn` at compile time and generate the
//! matching `pointfree::Signature` together with the code that converts
//! dynamic arguments back into the declared Rust types.
//!
//! # Available Attribute Macros
//!
//! - [`macro@partial`]: turns a function into a `pointfree::Partial`
//! - [`macro@pointfree`]: turns a function into a `pointfree::Pointfree`
//! - [`macro@pf`]: short alias for [`macro@pointfree`]
//!
//! # Parameter Attributes
//!
//! - `#[default(expr)]`: the parameter has a default value
//! - `#[rest]`: a `Vec<T>` collecting extra positional arguments
//! - `#[keyword_only]`: the parameter can only be supplied by keyword
//! - `#[keywords]`: a `Keywords` map collecting extra keyword arguments
//!
//! # Example
//!
//! ```rust,ignore
//! use pointfree::prelude::*;
//!
//! #[pointfree]
//! fn greet(name: String, #[default("hello")] greeting: String) -> String {
//!     format!("{greeting}, {name}")
//! }
//!
//! // `greet` is now a constructor for the wrapped function.
//! let greet = greet();
//! assert_eq!(greet.call(args!["ada"]).unwrap(), Value::from("hello, ada"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod wrap;

use proc_macro::TokenStream;

use wrap::Wrapper;

/// Turns a function into a constructor for a `pointfree::Partial`.
///
/// The annotated `fn name(..) -> T` becomes `fn name() -> Partial`. The
/// returned partial accepts its arguments over any number of calls and runs
/// the original body on the call that binds the last required parameter.
/// The wrapper is built once and cloned on every call to the constructor.
///
/// # Requirements
///
/// - No generics, `async`, `const` or `unsafe`
/// - Parameters are plain identifiers with owned types implementing
///   `pointfree::FromValue`
/// - The return type implements `pointfree::IntoValue`; a `Result` return
///   propagates its error through `Into<CallError>`
/// - Inside the body, `name` is the zero-argument constructor, so a recursive
///   call is written `name().call(args![..])`
/// - An associated function without a receiver cannot use `Self` in its body
///   or parameter types; name the type instead
///
/// # Methods
///
/// A method taking `&self` or `self` becomes `fn name(&self) -> Partial`.
/// The receiver is cloned when the constructor is called and bound ahead of
/// the other parameters, so it does not appear in the signature. This
/// requires `Self: Clone + Send + Sync + 'static`. `&mut self` and typed
/// receivers are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use pointfree::prelude::*;
///
/// #[partial]
/// fn add3(a: i64, b: i64, c: i64) -> i64 {
///     a + b + c
/// }
///
/// let add3 = add3();
/// let add1 = add3.call(args![1]).unwrap();
/// assert_eq!(add1.call(args![2, 3]).unwrap(), Value::Int(6));
/// ```
#[proc_macro_attribute]
pub fn partial(attribute: TokenStream, item: TokenStream) -> TokenStream {
    wrap::wrap_impl(attribute.into(), item.into(), Wrapper::Partial).into()
}

/// Turns a function into a constructor for a composable `pointfree::Pointfree`.
///
/// Accepts the same input as [`macro@partial`], with the same requirements;
/// methods become `fn name(&self) -> Pointfree`. The result additionally
/// composes with `>>` and `*`.
///
/// # Example
///
/// ```rust,ignore
/// use pointfree::prelude::*;
///
/// #[pointfree]
/// fn square(x: i64) -> i64 { x * x }
///
/// #[pointfree]
/// fn increment(x: i64) -> i64 { x + 1 }
///
/// assert_eq!((square() * increment()).call(args![2]).unwrap(), Value::Int(9));
/// ```
#[proc_macro_attribute]
pub fn pointfree(attribute: TokenStream, item: TokenStream) -> TokenStream {
    wrap::wrap_impl(attribute.into(), item.into(), Wrapper::Pointfree).into()
}

/// Short alias for [`macro@pointfree`].
#[proc_macro_attribute]
pub fn pf(attribute: TokenStream, item: TokenStream) -> TokenStream {
    wrap::wrap_impl(attribute.into(), item.into(), Wrapper::Pointfree).into()
}
