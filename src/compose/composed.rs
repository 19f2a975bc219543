//! Composition nodes.

use std::fmt;

use super::pointfree::Pointfree;
use crate::engine::{Arguments, Signature};
use crate::error::CallError;
use crate::function::{Application, Callable, Function};

/// Two callables applied one after the other.
///
/// `first` receives every argument of the call; `second` receives the result
/// of `first` as its only positional argument. A node is immutable, and
/// composing never fails: operands are only called when the node is.
#[derive(Clone)]
pub struct Composed {
    first: Function,
    second: Function,
    signature: Signature,
}

impl Composed {
    /// `left >> right`: runs `left`, then `right`.
    pub fn forward(left: Function, right: Function) -> Self {
        let signature = Signature::variadic(format!("{} >> {}", left.name(), right.name()));
        Self {
            first: left.into_composable(),
            second: right.into_composable(),
            signature,
        }
    }

    /// `outer * inner`: runs `inner`, then `outer`.
    pub fn circle(outer: Function, inner: Function) -> Self {
        let signature = Signature::variadic(format!("{} * {}", outer.name(), inner.name()));
        Self {
            first: inner.into_composable(),
            second: outer.into_composable(),
            signature,
        }
    }

    /// Returns the operand applied first.
    pub const fn first(&self) -> &Function {
        &self.first
    }

    /// Returns the operand applied to the first operand's result.
    pub const fn second(&self) -> &Function {
        &self.second
    }
}

impl Callable for Composed {
    fn name(&self) -> &str {
        self.signature.name()
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }

    fn apply(&self, arguments: Arguments) -> Result<Application, CallError> {
        match self.first.apply(arguments)? {
            Application::Pending(first) => {
                tracing::trace!(
                    function = self.signature.name(),
                    operand = first.name(),
                    "deferring composition until operand is saturated"
                );
                let deferred = Self {
                    first,
                    second: self.second.clone(),
                    signature: self.signature.clone(),
                };
                Ok(Application::Pending(
                    Pointfree::from_composed(deferred).into(),
                ))
            }
            Application::Complete(value) => self.second.apply(Arguments::single(value)),
        }
    }

    fn as_composed(&self) -> Option<&Composed> {
        Some(self)
    }
}

impl fmt::Debug for Composed {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Composed")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::value::Value;
    use rstest::rstest;

    fn tag(label: &'static str) -> Function {
        Function::native(label, move |arguments| {
            let input = arguments.positional().first().cloned().unwrap_or_default();
            Ok(Value::Str(format!("{label}({input})")))
        })
    }

    #[rstest]
    fn test_forward_order() {
        let node = Composed::forward(tag("a"), tag("b"));
        assert_eq!(
            Function::new(node).call(args!["x"]).unwrap(),
            Value::from("b(a(x))")
        );
    }

    #[rstest]
    fn test_circle_order() {
        let node = Composed::circle(tag("a"), tag("b"));
        assert_eq!(node.name(), "a * b");
        assert_eq!(
            Function::new(node).call(args!["x"]).unwrap(),
            Value::from("a(b(x))")
        );
    }

    #[rstest]
    fn test_defers_while_first_is_pending() {
        let signature = Signature::builder("pair")
            .positional("left")
            .positional("right")
            .build()
            .unwrap();
        let pair = Function::define(signature, |frame| {
            Ok(Value::Str(format!(
                "{}{}",
                frame.argument::<String>("left")?,
                frame.argument::<String>("right")?
            )))
        });
        let node = Function::new(Composed::forward(pair, tag("wrap")));

        let pending = node.apply(args!["a"]).unwrap().into_pending().unwrap();
        assert!(pending.as_pointfree().is_some());
        assert_eq!(pending.call(args!["b"]).unwrap(), Value::from("wrap(ab)"));
    }
}
