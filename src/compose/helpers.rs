//! Ready-made composable functions.
//!
//! Every helper returns a [`Pointfree`] whose data parameter is still open,
//! so it drops straight into a pipeline:
//!
//! - [`map`], [`reduce`], [`collect`]: lazy transformation and consumption
//!   of sequences
//! - [`print`], [`print_each`], [`ignore`]: consumers with side effects
//! - [`identity`], [`constant`]: the two trivial combinators
//!
//! Sequence stages accept a [`Sequence`] or a [`Value::List`], and the lazy
//! ones return a new `Sequence` without pulling anything.

use super::pointfree::Pointfree;
use super::sink::Sink;
use crate::engine::{Arguments, Signature};
use crate::function::Function;
use crate::value::{Sequence, Value};

const ITERABLE: &str = "iterable";

/// Lazily applies `function` to every item of a sequence.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, map, Function, Value};
///
/// let double = Function::native("double", |arguments| {
///     Ok(Value::Int(arguments.positional()[0].as_int().unwrap_or(0) * 2))
/// });
/// let doubled = map(double).call(args![vec![1, 2, 3]]).unwrap();
///
/// let Value::Sequence(sequence) = doubled else { unreachable!() };
/// let items: Result<Vec<Value>, _> = sequence.collect();
/// assert_eq!(items.unwrap(), vec![Value::Int(2), Value::Int(4), Value::Int(6)]);
/// ```
pub fn map(function: impl Into<Function>) -> Pointfree {
    let function = function.into();
    Pointfree::define(Signature::unary("map", ITERABLE), move |frame| {
        let sequence: Sequence = frame.argument(ITERABLE)?;
        let function = function.clone();
        Ok(Value::Sequence(
            sequence.map_values(move |item| function.call(Arguments::single(item))),
        ))
    })
}

/// Folds a sequence with a two-argument `function`.
///
/// With an `initial` seed the fold starts from it; otherwise the first item
/// is the seed. An empty input yields the seed, or [`Value::Unit`] when there
/// is none.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, reduce, Function, Value};
///
/// let add = Function::native("add", |arguments| {
///     let sum = arguments.positional().iter().filter_map(Value::as_int).sum();
///     Ok(Value::Int(sum))
/// });
///
/// assert_eq!(reduce(&add, None).call(args![vec![1, 2, 3]]).unwrap(), Value::Int(6));
/// assert_eq!(
///     reduce(&add, Some(Value::Int(10))).call(args![Vec::<i64>::new()]).unwrap(),
///     Value::Int(10)
/// );
/// ```
pub fn reduce(function: impl Into<Function>, initial: Option<Value>) -> Pointfree {
    let function = function.into();
    Pointfree::define(Signature::unary("reduce", ITERABLE), move |frame| {
        let mut sequence: Sequence = frame.argument(ITERABLE)?;
        let seed = match &initial {
            Some(seed) => seed.clone(),
            None => match sequence.next() {
                Some(item) => item?,
                None => return Ok(Value::Unit),
            },
        };
        sequence.try_fold(seed, |accumulator, item| {
            function.call(Arguments::new().arg(accumulator).arg(item?))
        })
    })
}

/// Pulls at most `count` items (all of them for `None`) into a [`Value::List`].
pub fn collect(count: Option<usize>) -> Pointfree {
    Pointfree::define(Signature::unary("collect", ITERABLE), move |frame| {
        let sequence: Sequence = frame.argument(ITERABLE)?;
        let items = match count {
            Some(count) => sequence.take(count).collect::<Result<Vec<_>, _>>()?,
            None => sequence.collect::<Result<Vec<_>, _>>()?,
        };
        Ok(Value::List(items))
    })
}

/// Writes one value followed by `terminator` (default `"\n"`) to `sink`
/// (default stdout) and returns [`Value::Unit`].
pub fn print(terminator: Option<&str>, sink: Option<Sink>) -> Pointfree {
    let terminator = terminator.unwrap_or("\n").to_string();
    let sink = sink.unwrap_or_default();
    Pointfree::define(Signature::unary("print", "value"), move |frame| {
        let value: Value = frame.argument("value")?;
        sink.write_str(&format!("{value}{terminator}"))?;
        Ok(Value::Unit)
    })
}

/// Writes every item of a sequence, each followed by `terminator`.
///
/// Items are written as they are pulled, so output appears before a later
/// item fails.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, print_each, Sink, Value};
///
/// let sink = Sink::memory();
/// print_each(Some(" "), Some(sink.clone()))
///     .call(args![vec!["a", "b"]])
///     .unwrap();
/// assert_eq!(sink.contents().as_deref(), Some("a b "));
/// ```
pub fn print_each(terminator: Option<&str>, sink: Option<Sink>) -> Pointfree {
    let terminator = terminator.unwrap_or("\n").to_string();
    let sink = sink.unwrap_or_default();
    Pointfree::define(Signature::unary("print_each", ITERABLE), move |frame| {
        let sequence: Sequence = frame.argument(ITERABLE)?;
        for item in sequence {
            sink.write_str(&format!("{}{terminator}", item?))?;
        }
        Ok(Value::Unit)
    })
}

/// Pulls every item of a sequence and discards it.
///
/// Useful at the end of a pipeline whose stages act through side effects.
/// The first failing item stops the pull and its error is returned.
pub fn ignore() -> Pointfree {
    Pointfree::define(Signature::unary("ignore", ITERABLE), |frame| {
        let sequence: Sequence = frame.argument(ITERABLE)?;
        for item in sequence {
            item?;
        }
        Ok(Value::Unit)
    })
}

/// Returns its argument unchanged.
pub fn identity() -> Pointfree {
    Pointfree::define(Signature::unary("identity", "value"), |frame| {
        frame.argument("value")
    })
}

/// Returns `value` whatever the arguments.
///
/// This turns a plain value into something that composes. Since the
/// function accepts anything and requires nothing, it runs on the first call.
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, constant, Value};
///
/// let answer = constant(42_i64);
/// assert_eq!(answer.call(args![]).unwrap(), Value::Int(42));
/// assert_eq!(answer.call(args!["ignored"; also = 1]).unwrap(), Value::Int(42));
/// ```
pub fn constant(value: impl crate::value::IntoValue) -> Pointfree {
    let value = value.into_value();
    Pointfree::define(Signature::variadic("constant"), move |_| Ok(value.clone()))
}
