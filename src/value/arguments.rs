//! Positional and keyword arguments of a call.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::{FromValue, Value};
use crate::callable::{BoundArguments, Signature};
use crate::compose::DEFAULT_NAME;
use crate::error::CallError;

/// The arguments of a single call: ordered positional values followed by
/// ordered keyword values.
///
/// Keywords keep their insertion order. Setting a keyword that is already
/// present replaces its value in place.
///
/// Most code builds this with the [`args!`](crate::args) macro.
///
/// # Examples
///
/// ```rust
/// use sidekick::{Arguments, Value, args};
///
/// let arguments = args![1, "two", scale = 3];
/// assert_eq!(arguments.len(), 3);
/// assert_eq!(arguments.get(1), Some(&Value::from("two")));
/// assert_eq!(arguments.get_keyword("scale"), Some(&Value::from(3)));
///
/// let mut built = Arguments::new();
/// built.push(1);
/// built.push("two");
/// built.set_keyword("scale", 3);
/// assert_eq!(built, arguments);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: SmallVec<[Value; 4]>,
    keywords: SmallVec<[(Arc<str>, Value); 2]>,
}

impl Arguments {
    /// Creates an empty argument bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bundle of positional values only.
    pub fn from_positional<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keywords: SmallVec::new(),
        }
    }

    /// Appends a positional value.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Sets a keyword value, replacing an existing value under that name.
    pub fn set_keyword(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self
            .keywords
            .iter_mut()
            .find(|(existing, _)| &**existing == name)
        {
            Some((_, slot)) => *slot = value,
            None => self.keywords.push((Arc::from(name), value)),
        }
    }

    /// Returns the positional value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Returns the keyword value stored under `name`.
    pub fn get_keyword(&self, name: &str) -> Option<&Value> {
        self.keywords
            .iter()
            .find(|(existing, _)| &**existing == name)
            .map(|(_, value)| value)
    }

    /// Converts a copy of the positional value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::MissingArgument`] when there is no value at
    /// `index`, or the conversion error of [`FromValue`].
    pub fn get_as<T: FromValue>(&self, index: usize) -> Result<T, CallError> {
        let value = self.get(index).ok_or_else(|| CallError::MissingArgument {
            function: DEFAULT_NAME.to_string(),
            parameter: format!("#{index}"),
        })?;
        T::from_value(value.clone())
    }

    /// Converts a copy of the keyword value stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::MissingArgument`] when the keyword is absent, or
    /// the conversion error of [`FromValue`].
    pub fn keyword_as<T: FromValue>(&self, name: &str) -> Result<T, CallError> {
        let value = self
            .get_keyword(name)
            .ok_or_else(|| CallError::MissingArgument {
                function: DEFAULT_NAME.to_string(),
                parameter: name.to_string(),
            })?;
        T::from_value(value.clone())
    }

    /// Returns the positional values.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the keyword values in insertion order.
    pub fn keywords(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keywords.iter().map(|(name, value)| (&**name, value))
    }

    /// Returns the number of positional values.
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    /// Returns the number of keyword values.
    pub fn keyword_len(&self) -> usize {
        self.keywords.len()
    }

    /// Returns the total number of values.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    /// Returns `true` if there are no values at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Returns `true` if any positional value is the placeholder marker.
    pub fn has_positional_placeholder(&self) -> bool {
        self.positional.iter().any(Value::is_placeholder)
    }

    /// Returns `true` if any keyword value is the placeholder marker.
    pub fn has_keyword_placeholder(&self) -> bool {
        self.keywords.iter().any(|(_, value)| value.is_placeholder())
    }

    /// Appends `other` to this bundle.
    ///
    /// Positional values of `other` follow the existing ones. Keywords of
    /// `other` override existing keywords with the same name.
    #[must_use]
    pub fn extend(mut self, other: Self) -> Self {
        self.positional.extend(other.positional);
        for (name, value) in other.keywords {
            self.set_keyword(&name, value);
        }
        self
    }

    /// Replaces every placeholder among the positional values with `value`.
    #[must_use]
    pub fn substitute_positional(mut self, value: &Value) -> Self {
        for slot in self.positional.iter_mut().filter(|slot| slot.is_placeholder()) {
            *slot = value.clone();
        }
        self
    }

    /// Replaces every placeholder among the keyword values with `value`.
    #[must_use]
    pub fn substitute_keywords(mut self, value: &Value) -> Self {
        for (_, slot) in self
            .keywords
            .iter_mut()
            .filter(|(_, slot)| slot.is_placeholder())
        {
            *slot = value.clone();
        }
        self
    }

    /// Binds these arguments to the parameters of `signature`.
    ///
    /// `function` names the callee in error messages.
    ///
    /// # Errors
    ///
    /// See [`Signature::bind`].
    pub fn bind(self, function: &str, signature: &Signature) -> Result<BoundArguments, CallError> {
        signature.bind(function, self)
    }

    /// Splits the bundle into its positional and keyword parts.
    pub fn into_parts(self) -> (Vec<Value>, Vec<(Arc<str>, Value)>) {
        (self.positional.into_vec(), self.keywords.into_vec())
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.positional {
            if !first {
                write!(formatter, ", ")?;
            }
            first = false;
            write!(formatter, "{value}")?;
        }
        for (name, value) in &self.keywords {
            if !first {
                write!(formatter, ", ")?;
            }
            first = false;
            write!(formatter, "{name}={value}")?;
        }
        Ok(())
    }
}

impl<V: Into<Value>> FromIterator<V> for Arguments {
    fn from_iter<I: IntoIterator<Item = V>>(iterator: I) -> Self {
        Self::from_positional(iterator)
    }
}

/// Builds an [`Arguments`] bundle.
///
/// Positional values come first, keyword values are written `name = value`.
/// The placeholder marker can be written as a bare `__`, no import needed.
///
/// # Syntax
///
/// - `args![]` creates an empty bundle
/// - `args![1, "a"]` creates two positional values
/// - `args![1, scale = 2]` mixes positional and keyword values
/// - `args![__, 2, base = __]` places placeholders
///
/// # Examples
///
/// ```rust
/// use sidekick::{Value, args};
///
/// let arguments = args![__, 2, base = 10];
/// assert!(arguments.has_positional_placeholder());
/// assert!(!arguments.has_keyword_placeholder());
/// assert_eq!(arguments.get(1), Some(&Value::from(2)));
/// ```
#[macro_export]
macro_rules! args {
    (@push $arguments:ident;) => {};

    (@push $arguments:ident; $name:ident = __ $(, $($rest:tt)*)?) => {
        $arguments.set_keyword(::core::stringify!($name), $crate::Value::Placeholder);
        $crate::args!(@push $arguments; $($($rest)*)?);
    };

    (@push $arguments:ident; $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $arguments.set_keyword(::core::stringify!($name), $value);
        $crate::args!(@push $arguments; $($($rest)*)?);
    };

    (@push $arguments:ident; __ $(, $($rest:tt)*)?) => {
        $arguments.push($crate::Value::Placeholder);
        $crate::args!(@push $arguments; $($($rest)*)?);
    };

    (@push $arguments:ident; $value:expr $(, $($rest:tt)*)?) => {
        $arguments.push($value);
        $crate::args!(@push $arguments; $($($rest)*)?);
    };

    () => {
        $crate::Arguments::new()
    };

    ($($tokens:tt)+) => {{
        let mut arguments = $crate::Arguments::new();
        $crate::args!(@push arguments; $($tokens)+);
        arguments
    }};
}
