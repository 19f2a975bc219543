//! Signature descriptors.
//!
//! A [`Signature`] is the static record of a callable's declared parameters:
//! the ordered positional-or-keyword parameters with their defaults, an
//! optional positional-rest catch-all, keyword-only parameters, and an
//! optional keyword-rest catch-all. It is computed once when a callable is
//! wrapped and never changes afterwards.
//!
//! Rust offers no runtime reflection of parameter lists, so descriptors are
//! either written with [`Signature::builder`] or derived at compile time by
//! the `#[pointfree]` / `#[partial]` attributes.

use std::fmt;

use crate::error::SignatureError;
use crate::value::{IntoValue, Value};

/// One named parameter and its default, if it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    default: Option<Value>,
}

impl Parameter {
    /// Returns the parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the default value, if any.
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns `true` when the parameter has no default.
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A callable's declared parameter list.
///
/// # Examples
///
/// ```rust
/// use pointfree::Signature;
///
/// let signature = Signature::builder("render")
///     .positional("template")
///     .optional("indent", 2_i64)
///     .rest("parts")
///     .keyword_only("style")
///     .keywords("options")
///     .build()
///     .unwrap();
///
/// assert_eq!(signature.required_count(), 2);
/// assert!(signature.accepts_keyword("style"));
/// assert!(signature.accepts_keyword("anything")); // absorbed by **options
/// assert_eq!(
///     signature.to_string(),
///     "render(template, indent=2, *parts, style, **options)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    positional: Vec<Parameter>,
    rest: Option<String>,
    keyword_only: Vec<Parameter>,
    keywords: Option<String>,
}

impl Signature {
    /// Starts describing a function called `name`.
    pub fn builder(name: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder {
            name: name.into(),
            positional: Vec::new(),
            rest: None,
            keyword_only: Vec::new(),
            keywords: None,
        }
    }

    /// A signature accepting anything: `name(*args, **kwargs)`.
    ///
    /// Such a callable has no required parameters, so the engine invokes it
    /// on the first call.
    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
            rest: Some("args".to_string()),
            keyword_only: Vec::new(),
            keywords: Some("kwargs".to_string()),
        }
    }

    /// A signature with one required positional parameter.
    pub(crate) fn unary(name: impl Into<String>, parameter: &str) -> Self {
        Self {
            name: name.into(),
            positional: vec![Parameter {
                name: parameter.to_string(),
                default: None,
            }],
            rest: None,
            keyword_only: Vec::new(),
            keywords: None,
        }
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the positional-or-keyword parameters in declaration order.
    pub fn positional(&self) -> &[Parameter] {
        &self.positional
    }

    /// Returns the positional-rest parameter name, if declared.
    pub fn rest(&self) -> Option<&str> {
        self.rest.as_deref()
    }

    /// Returns the keyword-only parameters in declaration order.
    pub fn keyword_only(&self) -> &[Parameter] {
        &self.keyword_only
    }

    /// Returns the keyword-rest parameter name, if declared.
    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    /// Returns the index of the positional parameter called `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.positional
            .iter()
            .position(|parameter| parameter.name == name)
    }

    /// Returns `true` when `name` is a declared positional or keyword-only parameter.
    pub fn declares(&self, name: &str) -> bool {
        self.position_of(name).is_some()
            || self
                .keyword_only
                .iter()
                .any(|parameter| parameter.name == name)
    }

    /// Returns `true` when a keyword argument called `name` can be bound.
    pub fn accepts_keyword(&self, name: &str) -> bool {
        self.keywords.is_some() || self.declares(name)
    }

    /// Returns the number of parameters without defaults.
    ///
    /// Rest catch-alls are never required.
    pub fn required_count(&self) -> usize {
        self.positional
            .iter()
            .chain(&self.keyword_only)
            .filter(|parameter| parameter.is_required())
            .count()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.positional.iter().map(describe).collect();
        match &self.rest {
            Some(rest) => parts.push(format!("*{rest}")),
            None if !self.keyword_only.is_empty() => parts.push("*".to_string()),
            None => {}
        }
        parts.extend(self.keyword_only.iter().map(describe));
        if let Some(keywords) = &self.keywords {
            parts.push(format!("**{keywords}"));
        }
        write!(formatter, "{}({})", self.name, parts.join(", "))
    }
}

fn describe(parameter: &Parameter) -> String {
    match &parameter.default {
        Some(Value::Str(text)) => format!("{}={text:?}", parameter.name),
        Some(default) => format!("{}={default}", parameter.name),
        None => parameter.name.clone(),
    }
}

/// Incrementally describes a [`Signature`].
///
/// Parameters are recorded in call order. [`SignatureBuilder::build`]
/// validates the result.
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    name: String,
    positional: Vec<Parameter>,
    rest: Option<String>,
    keyword_only: Vec<Parameter>,
    keywords: Option<String>,
}

impl SignatureBuilder {
    /// Adds a required positional-or-keyword parameter.
    #[must_use]
    pub fn positional(mut self, name: impl Into<String>) -> Self {
        self.positional.push(Parameter {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Adds a positional-or-keyword parameter with a default.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, default: impl IntoValue) -> Self {
        self.positional.push(Parameter {
            name: name.into(),
            default: Some(default.into_value()),
        });
        self
    }

    /// Declares the positional-rest catch-all.
    #[must_use]
    pub fn rest(mut self, name: impl Into<String>) -> Self {
        self.rest = Some(name.into());
        self
    }

    /// Adds a required keyword-only parameter.
    #[must_use]
    pub fn keyword_only(mut self, name: impl Into<String>) -> Self {
        self.keyword_only.push(Parameter {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Adds a keyword-only parameter with a default.
    #[must_use]
    pub fn keyword_only_optional(
        mut self,
        name: impl Into<String>,
        default: impl IntoValue,
    ) -> Self {
        self.keyword_only.push(Parameter {
            name: name.into(),
            default: Some(default.into_value()),
        });
        self
    }

    /// Declares the keyword-rest catch-all.
    #[must_use]
    pub fn keywords(mut self, name: impl Into<String>) -> Self {
        self.keywords = Some(name.into());
        self
    }

    /// Validates and returns the signature.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::EmptyName`] when the function name is empty
    /// - [`SignatureError::DuplicateParameter`] when two parameters share a name
    /// - [`SignatureError::RequiredAfterOptional`] when a required positional
    ///   parameter follows one with a default
    pub fn build(self) -> Result<Signature, SignatureError> {
        if self.name.is_empty() {
            return Err(SignatureError::EmptyName);
        }

        let mut seen: Vec<&str> = Vec::new();
        let names = self
            .positional
            .iter()
            .map(Parameter::name)
            .chain(self.rest.as_deref())
            .chain(self.keyword_only.iter().map(Parameter::name))
            .chain(self.keywords.as_deref());
        for name in names {
            if seen.contains(&name) {
                return Err(SignatureError::DuplicateParameter {
                    function: self.name.clone(),
                    name: name.to_string(),
                });
            }
            seen.push(name);
        }

        let mut optional_seen = false;
        for parameter in &self.positional {
            if parameter.is_required() && optional_seen {
                return Err(SignatureError::RequiredAfterOptional {
                    function: self.name.clone(),
                    name: parameter.name.clone(),
                });
            }
            optional_seen |= !parameter.is_required();
        }

        Ok(Signature {
            name: self.name,
            positional: self.positional,
            rest: self.rest,
            keyword_only: self.keyword_only,
            keywords: self.keywords,
        })
    }
}
