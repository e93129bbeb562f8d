//! Partial application with placeholder substitution.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::DEFAULT_NAME;
use crate::callable::Callable;
use crate::error::CallError;
use crate::value::{Arguments, Value};

/// Where placeholders appear among the fixed arguments of a partial
/// application.
///
/// Chosen once, when the partial application is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substitution {
    /// No placeholders: call-time arguments are appended.
    None,
    /// Placeholders among the positional values only.
    Positional,
    /// Placeholders among the keyword values only.
    Keyword,
    /// Placeholders among both.
    Both,
}

impl Substitution {
    /// Classifies the fixed arguments.
    pub fn of(arguments: &Arguments) -> Self {
        match (
            arguments.has_positional_placeholder(),
            arguments.has_keyword_placeholder(),
        ) {
            (false, false) => Self::None,
            (true, false) => Self::Positional,
            (false, true) => Self::Keyword,
            (true, true) => Self::Both,
        }
    }

    const fn positional(self) -> bool {
        matches!(self, Self::Positional | Self::Both)
    }

    const fn keyword(self) -> bool {
        matches!(self, Self::Keyword | Self::Both)
    }
}

/// A callable with some arguments fixed ahead of time.
///
/// Without placeholders the fixed positional values come first, call-time
/// positional values follow, and call-time keywords override fixed ones.
///
/// With placeholders the result accepts exactly one positional argument.
/// That single value replaces every placeholder, positional and keyword
/// alike; distinct placeholders cannot receive distinct values.
///
/// # Examples
///
/// ```rust
/// use sidekick::{Callable, PartialApplication, Substitution, Value, args, func};
///
/// let pair = func(|arguments: sidekick::Arguments| -> Result<Value, sidekick::CallError> {
///     Ok(Value::from(arguments.positional().to_vec()))
/// });
///
/// let both = PartialApplication::new(pair.inner().clone(), args![__, 0, __]);
/// assert_eq!(both.substitution(), Substitution::Positional);
/// assert_eq!(both.call(args![7]).unwrap(), Value::from(vec![7, 0, 7]));
/// ```
pub struct PartialApplication {
    function: Arc<dyn Callable>,
    fixed: Arguments,
    substitution: Substitution,
}

impl PartialApplication {
    /// Fixes `fixed`, choosing the substitution mode from its placeholders.
    pub fn new(function: Arc<dyn Callable>, fixed: Arguments) -> Self {
        let substitution = Substitution::of(&fixed);
        trace!(?substitution, fixed = %fixed, "partial application built");
        Self {
            function,
            fixed,
            substitution,
        }
    }

    /// Fixes `fixed` as ordinary partial application, treating placeholders
    /// as plain values.
    pub fn plain(function: Arc<dyn Callable>, fixed: Arguments) -> Self {
        Self {
            function,
            fixed,
            substitution: Substitution::None,
        }
    }

    /// The substitution mode.
    pub const fn substitution(&self) -> Substitution {
        self.substitution
    }

    /// The fixed arguments.
    pub const fn fixed(&self) -> &Arguments {
        &self.fixed
    }
}

impl Callable for PartialApplication {
    fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        if self.substitution == Substitution::None {
            return self.function.call(self.fixed.clone().extend(arguments));
        }

        let value = single_argument(arguments)?;
        let mut substituted = self.fixed.clone();
        if self.substitution.positional() {
            substituted = substituted.substitute_positional(&value);
        }
        if self.substitution.keyword() {
            substituted = substituted.substitute_keywords(&value);
        }
        self.function.call(substituted)
    }

    fn closure(&self) -> Option<&[Value]> {
        Some(self.fixed.positional())
    }
}

fn single_argument(arguments: Arguments) -> Result<Value, CallError> {
    if let Some((keyword, _)) = arguments.keywords().next() {
        return Err(CallError::UnexpectedKeyword {
            function: DEFAULT_NAME.to_string(),
            keyword: keyword.to_string(),
        });
    }
    let (positional, _) = arguments.into_parts();
    let received = positional.len();
    let mut values = positional.into_iter();
    match (values.next(), received) {
        (Some(value), 1) => Ok(value),
        (None, _) => Err(CallError::MissingArgument {
            function: DEFAULT_NAME.to_string(),
            parameter: "x".to_string(),
        }),
        (Some(_), _) => Err(CallError::TooManyPositional {
            function: DEFAULT_NAME.to_string(),
            expected: 1,
            received,
        }),
    }
}

impl fmt::Debug for PartialApplication {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "partial({:?}, {})", self.function, self.fixed)
    }
}
