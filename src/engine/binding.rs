//! Binding state: the arguments accumulated across partial applications.
//!
//! A [`BindingState`] is never mutated once built. Merging a new call's
//! arguments produces a fresh state, so two partial applications derived
//! from the same parent never observe each other's arguments.
//!
//! # Merge rules
//!
//! Merging validates in three steps, each failing on the call that caused the
//! problem rather than on a later call in the chain:
//!
//! 1. Every keyword must be declared or absorbed by a keyword-rest
//!    ([`CallError::UnexpectedKeyword`]).
//! 2. Positional arguments fill slots left to right. Overflowing the declared
//!    slots needs a positional-rest ([`CallError::TooManyPositional`]), and a
//!    position landing on a slot already bound by keyword is a
//!    [`CallError::DuplicateBinding`].
//! 3. A keyword already bound, by an earlier keyword or by position, is a
//!    [`CallError::DuplicateBinding`].
//!
//! Defaults are never stored here; they are supplied when the state is
//! turned into a [`Frame`] at invocation time.

use smallvec::SmallVec;

use super::arguments::{Arguments, INLINE_ARGUMENTS};
use super::frame::Frame;
use super::signature::Signature;
use crate::error::CallError;
use crate::value::{Keywords, Value};

/// Positional and keyword arguments bound so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingState {
    positional: SmallVec<[Value; INLINE_ARGUMENTS]>,
    keywords: Keywords,
}

impl BindingState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the positional values bound so far.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the keyword values bound so far.
    pub const fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Returns the number of bound values.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    /// Returns `true` when nothing has been bound.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Returns a new state with `arguments` merged in.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::UnexpectedKeyword`], [`CallError::TooManyPositional`],
    /// or [`CallError::DuplicateBinding`] as described in the module docs.
    pub fn merge(&self, signature: &Signature, arguments: Arguments) -> Result<Self, CallError> {
        let (positional, keywords) = arguments.into_parts();

        if let Some((name, _)) = keywords
            .iter()
            .find(|(name, _)| !signature.accepts_keyword(name))
        {
            return Err(CallError::UnexpectedKeyword {
                function: signature.name().to_string(),
                name: name.clone(),
            });
        }

        let declared = signature.positional().len();
        let given = self.positional.len() + positional.len();
        if given > declared && signature.rest().is_none() {
            return Err(CallError::TooManyPositional {
                function: signature.name().to_string(),
                expected: declared,
                given,
            });
        }
        for parameter in &signature.positional()[self.positional.len().min(declared)..given.min(declared)] {
            if self.keywords.contains(parameter.name()) {
                return Err(duplicate(signature, parameter.name()));
            }
        }

        let mut merged_positional = self.positional.clone();
        merged_positional.extend(positional);

        let mut merged_keywords = self.keywords.clone();
        for (name, value) in keywords {
            let bound_by_position = signature
                .position_of(&name)
                .is_some_and(|index| index < merged_positional.len());
            if bound_by_position || merged_keywords.contains(&name) {
                return Err(duplicate(signature, &name));
            }
            merged_keywords.insert(name, value);
        }

        Ok(Self {
            positional: merged_positional,
            keywords: merged_keywords,
        })
    }

    /// Returns the required parameters not yet bound, in declaration order.
    ///
    /// An empty result means the callable is ready to be invoked.
    pub fn pending<'signature>(&self, signature: &'signature Signature) -> Vec<&'signature str> {
        let positional = signature
            .positional()
            .iter()
            .enumerate()
            .filter(|(index, parameter)| {
                parameter.is_required()
                    && *index >= self.positional.len()
                    && !self.keywords.contains(parameter.name())
            })
            .map(|(_, parameter)| parameter.name());
        let keyword_only = signature
            .keyword_only()
            .iter()
            .filter(|parameter| parameter.is_required() && !self.keywords.contains(parameter.name()))
            .map(super::signature::Parameter::name);
        positional.chain(keyword_only).collect()
    }

    /// Returns `true` when every required parameter is bound.
    pub fn is_ready(&self, signature: &Signature) -> bool {
        let positional_ready = signature
            .positional()
            .iter()
            .skip(self.positional.len())
            .all(|parameter| !parameter.is_required() || self.keywords.contains(parameter.name()));
        positional_ready
            && signature
                .keyword_only()
                .iter()
                .all(|parameter| !parameter.is_required() || self.keywords.contains(parameter.name()))
    }

    /// Converts the state back into call arguments.
    pub fn into_arguments(self) -> Arguments {
        let arguments: Arguments = self.positional.into_iter().collect();
        self.keywords
            .into_iter()
            .fold(arguments, |arguments, (name, value)| arguments.keyword(name, value))
    }

    /// Resolves every parameter, filling defaults, into a [`Frame`].
    ///
    /// # Errors
    ///
    /// Returns [`CallError::MissingArguments`] when a required parameter is unbound.
    pub fn into_frame(self, signature: &Signature) -> Result<Frame, CallError> {
        let missing = self.pending(signature);
        if !missing.is_empty() {
            return Err(CallError::MissingArguments {
                function: signature.name().to_string(),
                names: missing.into_iter().map(str::to_string).collect(),
            });
        }

        let mut positional = self.positional.into_iter();
        let mut keywords = self.keywords;
        let mut values = Keywords::new();

        for parameter in signature.positional() {
            let value = positional
                .next()
                .or_else(|| keywords.remove(parameter.name()))
                .or_else(|| parameter.default().cloned())
                .unwrap_or_default();
            values.insert(parameter.name(), value);
        }
        let rest: Vec<Value> = positional.collect();

        for parameter in signature.keyword_only() {
            let value = keywords
                .remove(parameter.name())
                .or_else(|| parameter.default().cloned())
                .unwrap_or_default();
            values.insert(parameter.name(), value);
        }

        Ok(Frame::new(signature, values, rest, keywords))
    }
}

fn duplicate(signature: &Signature, name: &str) -> CallError {
    CallError::DuplicateBinding {
        function: signature.name().to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use rstest::{fixture, rstest};

    #[fixture]
    fn add3() -> Signature {
        Signature::builder("add3")
            .positional("a")
            .positional("b")
            .positional("c")
            .build()
            .unwrap()
    }

    #[fixture]
    fn with_defaults() -> Signature {
        Signature::builder("greet")
            .positional("name")
            .optional("greeting", "hello")
            .keyword_only("punctuation")
            .build()
            .unwrap()
    }

    #[rstest]
    fn test_merge_appends_positional(add3: Signature) {
        let state = BindingState::new().merge(&add3, args![1]).unwrap();
        let state = state.merge(&add3, args![2]).unwrap();
        assert_eq!(state.positional(), &[Value::Int(1), Value::Int(2)]);
        assert_eq!(state.pending(&add3), vec!["c"]);
        assert!(!state.is_ready(&add3));
    }

    #[rstest]
    fn test_merge_leaves_parent_untouched(add3: Signature) {
        let parent = BindingState::new().merge(&add3, args![1]).unwrap();
        let left = parent.merge(&add3, args![2]).unwrap();
        let right = parent.merge(&add3, args![; c = 9]).unwrap();

        assert_eq!(parent.len(), 1);
        assert_eq!(left.positional().len(), 2);
        assert!(left.keywords().is_empty());
        assert_eq!(right.positional().len(), 1);
        assert_eq!(right.keywords().get("c"), Some(&Value::Int(9)));
    }

    #[rstest]
    fn test_unexpected_keyword_fails_immediately(add3: Signature) {
        let error = BindingState::new().merge(&add3, args![; d = 3]).unwrap_err();
        assert!(matches!(error, CallError::UnexpectedKeyword { name, .. } if name == "d"));
    }

    #[rstest]
    fn test_too_many_positional(add3: Signature) {
        let state = BindingState::new().merge(&add3, args![1, 2]).unwrap();
        let error = state.merge(&add3, args![3, 4]).unwrap_err();
        assert!(matches!(
            error,
            CallError::TooManyPositional { expected: 3, given: 4, .. }
        ));
    }

    #[rstest]
    fn test_position_onto_keyword_is_duplicate(add3: Signature) {
        let state = BindingState::new().merge(&add3, args![; a = 1]).unwrap();
        let error = state.merge(&add3, args![2]).unwrap_err();
        assert!(matches!(error, CallError::DuplicateBinding { name, .. } if name == "a"));
    }

    #[rstest]
    fn test_keyword_onto_position_is_duplicate(add3: Signature) {
        let error = BindingState::new()
            .merge(&add3, args![1; a = 1])
            .unwrap_err();
        assert!(matches!(error, CallError::DuplicateBinding { name, .. } if name == "a"));
    }

    #[rstest]
    fn test_repeated_keyword_is_duplicate(add3: Signature) {
        let state = BindingState::new().merge(&add3, args![; b = 1]).unwrap();
        let error = state.merge(&add3, args![; b = 2]).unwrap_err();
        assert!(matches!(error, CallError::DuplicateBinding { name, .. } if name == "b"));
    }

    #[rstest]
    fn test_keyword_binding_satisfies_required(add3: Signature) {
        let state = BindingState::new()
            .merge(&add3, args![1; c = 3])
            .unwrap();
        assert_eq!(state.pending(&add3), vec!["b"]);
        let state = state.merge(&add3, args![; b = 2]).unwrap();
        assert!(state.is_ready(&add3));
    }

    #[rstest]
    fn test_defaults_are_not_stored(with_defaults: Signature) {
        let state = BindingState::new()
            .merge(&with_defaults, args!["ada"; punctuation = "!"])
            .unwrap();
        assert!(state.is_ready(&with_defaults));
        assert_eq!(state.len(), 2);
        assert!(state.keywords().get("greeting").is_none());
    }

    #[rstest]
    fn test_into_frame_fills_defaults(with_defaults: Signature) {
        let frame = BindingState::new()
            .merge(&with_defaults, args!["ada"; punctuation = "!"])
            .unwrap()
            .into_frame(&with_defaults)
            .unwrap();
        assert_eq!(frame.value("greeting"), Some(&Value::from("hello")));
        assert_eq!(frame.value("punctuation"), Some(&Value::from("!")));
    }

    #[rstest]
    fn test_into_frame_reports_missing(with_defaults: Signature) {
        let error = BindingState::new()
            .into_frame(&with_defaults)
            .unwrap_err();
        assert!(matches!(
            error,
            CallError::MissingArguments { names, .. } if names == vec!["name", "punctuation"]
        ));
    }

    #[rstest]
    fn test_into_arguments_round_trips_order(add3: Signature) {
        let state = BindingState::new()
            .merge(&add3, args![1; c = 3, b = 2])
            .unwrap();
        let arguments = state.into_arguments();
        assert_eq!(arguments.positional(), &[Value::Int(1)]);
        assert_eq!(arguments.keywords()[0].0, "c");
        assert_eq!(arguments.keywords()[1].0, "b");
    }
}
