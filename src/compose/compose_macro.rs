//! The `compose!` and `pipe!` macros.

/// Composes functions from right to left.
///
/// `compose!(f, g, h)` is `f * g * h`: calling it runs `h` with the call's
/// arguments, then `g`, then `f`. The first operand must be a
/// [`Pointfree`](crate::Pointfree) (owned or borrowed); the others may be
/// anything that converts into a [`Function`](crate::Function).
///
/// # Laws
///
/// - **Associativity**: `compose!(f, compose!(g, h))` behaves as `compose!(compose!(f, g), h)`
/// - **Identity**: `compose!(identity(), f)` and `compose!(f, identity())` behave as `f`
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, compose, Pointfree, Signature, Value};
///
/// let unary = |name: &str| Signature::builder(name).positional("x").build().unwrap();
/// let increment = Pointfree::define(unary("increment"), |frame| {
///     Ok(Value::Int(frame.argument::<i64>("x")? + 1))
/// });
/// let double = Pointfree::define(unary("double"), |frame| {
///     Ok(Value::Int(frame.argument::<i64>("x")? * 2))
/// });
///
/// // increment(double(5))
/// let composed = compose!(increment, double);
/// assert_eq!(composed.call(args![5]).unwrap(), Value::Int(11));
/// ```
#[macro_export]
macro_rules! compose {
    ($function:expr $(,)?) => {
        $crate::Pointfree::clone(&$function)
    };

    ($outer:expr, $($inner:expr),+ $(,)?) => {
        $crate::Pointfree::clone(&$outer)
            $(.of($inner))+
    };
}

/// Composes functions from left to right.
///
/// `pipe!(f, g, h)` is `f >> g >> h`: calling it runs `f` with the call's
/// arguments, then `g`, then `h`. As with [`compose!`], the first operand
/// must be a [`Pointfree`](crate::Pointfree).
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, pipe, Pointfree, Signature, Value};
///
/// let unary = |name: &str| Signature::builder(name).positional("x").build().unwrap();
/// let increment = Pointfree::define(unary("increment"), |frame| {
///     Ok(Value::Int(frame.argument::<i64>("x")? + 1))
/// });
/// let double = Pointfree::define(unary("double"), |frame| {
///     Ok(Value::Int(frame.argument::<i64>("x")? * 2))
/// });
///
/// // double(increment(5))
/// let piped = pipe!(increment, double);
/// assert_eq!(piped.call(args![5]).unwrap(), Value::Int(12));
/// ```
#[macro_export]
macro_rules! pipe {
    ($function:expr $(,)?) => {
        $crate::Pointfree::clone(&$function)
    };

    ($first:expr, $($next:expr),+ $(,)?) => {
        $crate::Pointfree::clone(&$first)
            $(.then($next))+
    };
}
