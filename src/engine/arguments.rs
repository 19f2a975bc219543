//! The arguments of a single call.

use smallvec::SmallVec;

use crate::value::{IntoValue, Value};

/// Positional values stored inline before spilling to the heap.
pub(crate) const INLINE_ARGUMENTS: usize = 4;

/// Positional and keyword arguments supplied to one call.
///
/// Keywords are kept as a list rather than a map so that a name repeated
/// within one call reaches the engine and is rejected as a duplicate binding.
///
/// Most code builds arguments with the [`args!`](crate::args) macro.
///
/// # Examples
///
/// ```rust
/// use pointfree::{Arguments, Value};
///
/// let arguments = Arguments::new().arg(1_i64).arg(2_i64).keyword("c", 3_i64);
/// assert_eq!(arguments.positional(), &[Value::Int(1), Value::Int(2)]);
/// assert_eq!(arguments.keywords().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: SmallVec<[Value; INLINE_ARGUMENTS]>,
    keywords: Vec<(String, Value)>,
}

impl Arguments {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an argument list holding one positional value.
    #[must_use]
    pub fn single(value: impl IntoValue) -> Self {
        Self::new().arg(value)
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl IntoValue) -> Self {
        self.positional.push(value.into_value());
        self
    }

    /// Appends a keyword argument.
    #[must_use]
    pub fn keyword(mut self, name: impl Into<String>, value: impl IntoValue) -> Self {
        self.keywords.push((name.into(), value.into_value()));
        self
    }

    /// Returns the positional arguments in call order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the keyword arguments in call order.
    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    /// Returns the total number of arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    /// Returns `true` when no argument was supplied.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        SmallVec<[Value; INLINE_ARGUMENTS]>,
        Vec<(String, Value)>,
    ) {
        (self.positional, self.keywords)
    }
}

impl<V: IntoValue> FromIterator<V> for Arguments {
    fn from_iter<I: IntoIterator<Item = V>>(iterator: I) -> Self {
        Self {
            positional: iterator.into_iter().map(IntoValue::into_value).collect(),
            keywords: Vec::new(),
        }
    }
}

/// Builds an [`Arguments`] list.
///
/// Positional arguments come first, separated by commas. Keyword arguments
/// follow a semicolon as `name = value` pairs. Every value is converted with
/// [`IntoValue`](crate::IntoValue).
///
/// # Syntax
///
/// - `args![]`: no arguments
/// - `args![1, 2]`: positional only
/// - `args![1; c = 3]`: positional and keyword
/// - `args![; a = 1, b = 2]`: keyword only (note the leading semicolon)
///
/// # Examples
///
/// ```rust
/// use pointfree::{args, Value};
///
/// let arguments = args![1, "two"; flag = true];
/// assert_eq!(arguments.positional(), &[Value::Int(1), Value::from("two")]);
/// assert_eq!(arguments.keywords()[0], ("flag".to_string(), Value::Bool(true)));
///
/// let keyword_only = args![; a = 1];
/// assert!(keyword_only.positional().is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };

    ($($value:expr),* ; $($name:ident = $keyword:expr),* $(,)?) => {
        $crate::Arguments::new()
            $(.arg($value))*
            $(.keyword(stringify!($name), $keyword))*
    };

    ($($value:expr),+ $(,)?) => {
        $crate::Arguments::new()
            $(.arg($value))+
    };
}
