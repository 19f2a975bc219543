#![cfg(feature = "derive")]
//! Tests for the `#[partial]`, `#[pointfree]` and `#[pf]` attributes.
//!
//! The keyword-only fixtures follow the classic `def f(a, b, *, c)` shapes:
//!
//! - `kwonly`: `(a, b, *, c)`
//! - `kwonly_defaults`: `(a, b, *, c=3)`
//! - `kwonly_varkw`: `(a, b, *, c, **kwargs)`
//!
//! `Thing` covers methods: `&self` and `self` receivers, and associated
//! functions with no receiver.

use pointfree::prelude::*;
use rstest::rstest;

// =============================================================================
// Fixtures
// =============================================================================

#[partial]
fn kwonly(a: i64, b: i64, #[keyword_only] c: i64) -> i64 {
    a + b + c
}

#[partial]
fn kwonly_defaults(a: i64, b: i64, #[keyword_only] #[default(3)] c: i64) -> i64 {
    a + b + c
}

#[partial]
fn kwonly_varkw(a: i64, b: i64, #[keyword_only] c: i64, #[keywords] kwargs: Keywords) -> Value {
    Value::List(vec![Value::Int(a + b + c), Value::Map(kwargs)])
}

/// Joins its arguments with a separator.
#[pf]
fn join(first: String, #[rest] others: Vec<String>, #[keyword_only] #[default(" ")] sep: String) -> String {
    std::iter::once(first)
        .chain(others)
        .collect::<Vec<_>>()
        .join(&sep)
}

#[pointfree]
fn record(mut total: i64, #[default(1)] step: i64) {
    total += step;
    assert!(total > 0);
}

#[derive(Clone)]
struct Thing {
    n: i64,
}

impl Thing {
    const M: i64 = 3;

    #[pointfree]
    fn instance_add(&self, a: i64) -> i64 {
        self.n + a
    }

    #[pointfree]
    fn instance_mul(&self, a: i64) -> i64 {
        self.n * a
    }

    #[pointfree]
    fn class_add(a: i64) -> i64 {
        Thing::M + a
    }

    #[pointfree]
    fn class_mul(a: i64) -> i64 {
        Thing::M * a
    }

    #[pf]
    fn static_add(a: i64) -> i64 {
        4 + a
    }

    #[pf]
    fn static_mul(a: i64) -> i64 {
        4 * a
    }

    #[pointfree]
    fn scaled_by(self, a: i64, #[default(1)] b: i64) -> i64 {
        self.n * a * b
    }

    #[partial]
    fn between(&self, low: i64, high: i64) -> bool {
        (low..=high).contains(&self.n)
    }
}

#[pointfree]
fn factorial(n: i64) -> Result<i64, CallError> {
    if n <= 1 {
        return Ok(1);
    }
    let rest = factorial().call(args![n - 1])?;
    Ok(n * rest.as_int().unwrap_or_default())
}

fn call_chain(start: Partial, calls: Vec<Arguments>) -> Result<Value, CallError> {
    let mut current = Value::Function(start.into());
    for arguments in calls {
        current = current.call(arguments)?;
    }
    Ok(current)
}

// =============================================================================
// Keyword-only parameters
// =============================================================================

#[rstest]
#[case(vec![args![1, 2; c = 3]])]
#[case(vec![args![1], args![2], args![; c = 3]])]
#[case(vec![args![1, 2], args![; c = 3]])]
#[case(vec![args![1], args![2; c = 3]])]
#[case(vec![args![; c = 3], args![1, 2]])]
#[case(vec![args![; c = 3], args![1], args![2]])]
#[case(vec![args![; a = 1], args![; b = 2], args![; c = 3]])]
fn test_keyword_only_application(#[case] calls: Vec<Arguments>) {
    assert_eq!(call_chain(kwonly(), calls).unwrap(), Value::Int(6));
}

#[rstest]
fn test_keyword_only_rejects_extra_positional() {
    let error = kwonly().call(args![1, 2, 3]).unwrap_err();
    assert!(matches!(
        error,
        CallError::TooManyPositional { expected: 2, given: 3, .. }
    ));
}

#[rstest]
fn test_keyword_only_rejects_unknown_keyword() {
    let error = kwonly().call(args![; d = 1]).unwrap_err();
    assert!(matches!(error, CallError::UnexpectedKeyword { name, .. } if name == "d"));
}

#[rstest]
fn test_keyword_only_is_required() {
    let pending = kwonly().call(args![1, 2]).unwrap();
    let function = pending.as_function().unwrap();
    assert_eq!(function.as_partial().unwrap().pending(), vec!["c"]);
}

#[rstest]
#[case(args![1, 2; c = 4], 7)]
#[case(args![1, 2], 6)]
fn test_keyword_only_default(#[case] arguments: Arguments, #[case] expected: i64) {
    assert_eq!(kwonly_defaults().call(arguments).unwrap(), Value::Int(expected));
}

#[rstest]
fn test_keyword_rest_collects_extras_in_order() {
    let result = kwonly_varkw().call(args![1, 2; c = 3, d = 4, e = 5]).unwrap();
    let expected: Keywords = [("d", 4_i64), ("e", 5)].into_iter().collect();
    assert_eq!(
        result,
        Value::List(vec![Value::Int(6), Value::Map(expected)])
    );
}

#[rstest]
fn test_keyword_rest_accumulates_across_calls() {
    let pending = kwonly_varkw().call(args![1; e = 5]).unwrap();
    let result = pending.call(args![2; c = 3, d = 4]).unwrap();
    let Value::List(items) = result else {
        panic!("expected a list");
    };
    let Value::Map(extras) = &items[1] else {
        panic!("expected a map");
    };
    assert_eq!(extras.names().collect::<Vec<_>>(), vec!["e", "d"]);
}

// =============================================================================
// Rest parameters and signatures
// =============================================================================

#[rstest]
#[case(args!["a"], "a")]
#[case(args!["a", "b", "c"], "a b c")]
#[case(args!["a", "b"; sep = "-"], "a-b")]
fn test_rest_and_keyword_only_default(#[case] arguments: Arguments, #[case] expected: &str) {
    assert_eq!(join().call(arguments).unwrap(), Value::from(expected));
}

#[rstest]
fn test_generated_signature() {
    let join = join();
    let signature = join.signature().unwrap();
    assert_eq!(signature.to_string(), "join(first, *others, sep=\" \")");
    assert_eq!(signature.required_count(), 1);

    assert_eq!(
        kwonly_varkw().signature().to_string(),
        "kwonly_varkw(a, b, *, c, **kwargs)"
    );
}

#[rstest]
fn test_unit_return_and_mutable_parameter() {
    assert_eq!(record().call(args![1]).unwrap(), Value::Unit);
}

#[rstest]
fn test_recursion_goes_through_the_constructor() {
    assert_eq!(factorial().call(args![5]).unwrap(), Value::Int(120));
}

#[rstest]
fn test_constructor_returns_clones_of_one_wrapper() {
    let first = kwonly_defaults();
    let second = kwonly_defaults();
    assert!(first.function().ptr_eq(second.function()));
}

// =============================================================================
// Methods and associated functions
// =============================================================================

#[rstest]
fn test_instance_methods_compose() {
    let thing = Thing { n: 2 };
    let composed = thing.instance_add() * thing.instance_mul();
    assert_eq!(composed.call(args![2]).unwrap(), Value::Int(6));
}

#[rstest]
fn test_associated_functions_compose() {
    let composed = Thing::class_add() * Thing::class_mul();
    assert_eq!(composed.call(args![2]).unwrap(), Value::Int(9));

    let composed = Thing::static_add() * Thing::static_mul();
    assert_eq!(composed.call(args![2]).unwrap(), Value::Int(12));
}

#[rstest]
fn test_method_binds_a_snapshot_of_the_receiver() {
    let mut thing = Thing { n: 2 };
    let add = thing.instance_add();
    thing.n = 10;

    assert_eq!(add.call(args![1]).unwrap(), Value::Int(3));
    assert_eq!(thing.instance_add().call(args![1]).unwrap(), Value::Int(11));
}

#[rstest]
fn test_method_signature_omits_receiver() {
    let thing = Thing { n: 2 };
    assert_eq!(
        thing.scaled_by().signature().unwrap().to_string(),
        "scaled_by(a, b=1)"
    );
}

#[rstest]
#[case(args![5], 10)]
#[case(args![5; b = 3], 30)]
fn test_owned_receiver_method(#[case] arguments: Arguments, #[case] expected: i64) {
    let thing = Thing { n: 2 };
    let scaled = thing.scaled_by();
    assert_eq!(scaled.call(arguments.clone()).unwrap(), Value::Int(expected));
    assert_eq!(scaled.call(arguments).unwrap(), Value::Int(expected));
}

#[rstest]
fn test_partial_method_accumulates() {
    let thing = Thing { n: 4 };
    let from_one = thing.between().call(args![1]).unwrap();
    assert_eq!(from_one.call(args![5]).unwrap(), Value::Bool(true));
    assert_eq!(from_one.call(args![3]).unwrap(), Value::Bool(false));
}
