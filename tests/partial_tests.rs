#![cfg(feature = "derive")]
//! Integration tests for the partial-application engine.
//!
//! These tests drive wrapped functions the way user code does: through the
//! attribute macros, the `partial` function and the `args!` macro.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use pointfree::prelude::*;
use pointfree::SignatureError;
use rstest::rstest;

#[partial]
fn add3(a: i64, b: i64, c: i64) -> i64 {
    a + b + c
}

#[partial]
fn greet(name: String, #[default("hello")] greeting: String) -> String {
    format!("{greeting}, {name}")
}

#[partial]
fn sum_all(first: i64, #[rest] others: Vec<i64>) -> i64 {
    first + others.iter().sum::<i64>()
}

#[partial]
fn checked_div(numerator: i64, denominator: i64) -> Result<i64, CallError> {
    if denominator == 0 {
        return Err(CallError::message("division by zero"));
    }
    Ok(numerator / denominator)
}

fn call_chain(function: &Partial, calls: Vec<Arguments>) -> Result<Value, CallError> {
    let mut current = Value::Function(function.into());
    for arguments in calls {
        current = current.call(arguments)?;
    }
    Ok(current)
}

// =============================================================================
// Accumulation
// =============================================================================

#[rstest]
#[case(vec![args![1, 2, 3]])]
#[case(vec![args![1], args![2], args![3]])]
#[case(vec![args![1, 2], args![3]])]
#[case(vec![args![1], args![2, 3]])]
#[case(vec![args![1; c = 3], args![; b = 2]])]
#[case(vec![args![; c = 3], args![; b = 2], args![; a = 1]])]
#[case(vec![args![], args![1, 2, 3]])]
fn test_add3_accumulates_to_six(#[case] calls: Vec<Arguments>) {
    assert_eq!(call_chain(&add3(), calls).unwrap(), Value::Int(6));
}

#[rstest]
fn test_pending_values_are_functions() {
    let pending = add3().call(args![1]).unwrap();
    assert!(matches!(pending, Value::Function(_)));

    let function = pending.as_function().unwrap();
    assert_eq!(function.name(), "add3");
    assert_eq!(function.as_partial().unwrap().pending(), vec!["b", "c"]);
}

#[rstest]
fn test_siblings_are_independent() {
    let parent = add3().call(args![1]).unwrap();
    let left = parent.call(args![10]).unwrap();
    let right = parent.call(args![20]).unwrap();

    assert_eq!(left.call(args![100]).unwrap(), Value::Int(111));
    assert_eq!(right.call(args![100]).unwrap(), Value::Int(121));
    assert_eq!(parent.call(args![0, 0]).unwrap(), Value::Int(1));
}

#[rstest]
fn test_siblings_run_on_separate_threads() {
    let parent = add3().call(args![1]).unwrap();

    let handles: Vec<_> = (0..8_i64)
        .map(|index| {
            let parent = parent.clone();
            thread::spawn(move || {
                let child = parent.call(args![index * 10]).unwrap();
                (index, child.call(args![index]).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (index, result) = handle.join().unwrap();
        assert_eq!(result, Value::Int(1 + index * 10 + index));
    }
    assert_eq!(parent.call(args![0, 0]).unwrap(), Value::Int(1));
}

#[rstest]
fn test_invokes_exactly_on_saturating_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let signature = Signature::builder("count")
        .positional("a")
        .positional("b")
        .build()
        .unwrap();
    let counted = Partial::define(signature, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Unit)
    });

    let pending = counted.call(args![1]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    pending.call(args![2]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Defaults and rest parameters
// =============================================================================

#[rstest]
#[case(args!["ada"], "hello, ada")]
#[case(args!["ada", "hi"], "hi, ada")]
#[case(args!["ada"; greeting = "hey"], "hey, ada")]
#[case(args![; greeting = "hey", name = "ada"], "hey, ada")]
fn test_defaults_evaluate_eagerly(#[case] arguments: Arguments, #[case] expected: &str) {
    assert_eq!(greet().call(arguments).unwrap(), Value::from(expected));
}

#[rstest]
fn test_default_does_not_wait_for_optional() {
    let pending = greet().call(args![; greeting = "hey"]).unwrap();
    assert!(matches!(pending, Value::Function(_)));
    assert_eq!(pending.call(args!["bob"]).unwrap(), Value::from("hey, bob"));
}

#[rstest]
#[case(args![1], 1)]
#[case(args![1, 2, 3, 4], 10)]
fn test_rest_never_blocks(#[case] arguments: Arguments, #[case] expected: i64) {
    assert_eq!(sum_all().call(arguments).unwrap(), Value::Int(expected));
}

// =============================================================================
// Failures
// =============================================================================

#[rstest]
fn test_keyword_then_position_is_duplicate() {
    let pending = add3().call(args![; a = 1]).unwrap();
    let error = pending.call(args![2]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "add3() got multiple values for argument 'a'"
    );
}

#[rstest]
fn test_unknown_keyword_fails_on_that_call() {
    let error = add3().call(args![1; d = 4]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "add3() got an unexpected keyword argument 'd'"
    );
}

#[rstest]
fn test_repeated_keyword_within_one_call() {
    let error = add3().call(args![; a = 1, a = 2]).unwrap_err();
    assert!(matches!(error, CallError::DuplicateBinding { name, .. } if name == "a"));
}

#[rstest]
fn test_too_many_positional_across_calls() {
    let pending = add3().call(args![1, 2]).unwrap();
    let error = pending.call(args![3, 4]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "add3() takes 3 positional arguments but 4 were given"
    );
}

#[rstest]
fn test_body_error_propagates() {
    let error = checked_div().call(args![1, 0]).unwrap_err();
    assert_eq!(error.to_string(), "division by zero");
    assert_eq!(checked_div().call(args![9, 3]).unwrap(), Value::Int(3));
}

#[rstest]
fn test_argument_type_error() {
    let error = add3().call(args![1, "two", 3]).unwrap_err();
    assert!(matches!(
        error,
        CallError::ArgumentType { parameter, expected: "int", found: "str", .. } if parameter == "b"
    ));
}

#[rstest]
fn test_opaque_callable_cannot_be_wrapped() {
    let opaque = Function::native("opaque", |_| Ok(Value::Unit));
    assert!(matches!(
        partial(opaque),
        Err(CallError::Introspection { function }) if function == "opaque"
    ));
}

#[rstest]
fn test_rewrapping_keeps_bound_arguments() {
    let pending = add3().call(args![1]).unwrap();
    let rewrapped = partial(pending.as_function().unwrap()).unwrap();
    let rewrapped_twice = partial(&rewrapped).unwrap();
    assert_eq!(rewrapped_twice.state().positional(), &[Value::Int(1)]);
    assert_eq!(rewrapped_twice.call(args![2, 3]).unwrap(), Value::Int(6));
}

#[rstest]
fn test_invalid_signature_is_rejected() {
    let result = Signature::builder("f")
        .positional("a")
        .rest("a")
        .build();
    assert!(matches!(result, Err(SignatureError::DuplicateParameter { .. })));
}
