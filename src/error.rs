//! Error types for wrapped calls and curry construction.
//!
//! Two kinds of failure exist:
//!
//! - [`CurryError`]: raised eagerly when a callable cannot be curried.
//! - [`CallError`]: raised while invoking a callable. Combinators never
//!   translate these; an error produced by a wrapped callable reaches the
//!   caller exactly as it was produced.

/// Represents an error raised while invoking a callable.
///
/// The argument-binding variants are produced by [`Signature::bind`] and by
/// the combinators that accept a fixed number of arguments. User callables
/// report their own failures through [`CallError::Raised`], which is what
/// `From<&str>` and `From<String>` build.
///
/// # Examples
///
/// ```rust
/// use sidekick::CallError;
///
/// let error = CallError::MissingArgument {
///     function: "add".to_string(),
///     parameter: "y".to_string(),
/// };
/// assert_eq!(format!("{error}"), "add() missing required argument: 'y'");
///
/// let raised = CallError::from("division by zero");
/// assert_eq!(format!("{raised}"), "division by zero");
/// ```
///
/// [`Signature::bind`]: crate::Signature::bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// A required parameter received no value.
    MissingArgument {
        /// The name of the function being called.
        function: String,
        /// The parameter that was left unbound.
        parameter: String,
    },
    /// More positional arguments were supplied than the function accepts.
    TooManyPositional {
        /// The name of the function being called.
        function: String,
        /// The number of positional arguments the function accepts.
        expected: usize,
        /// The number of positional arguments supplied.
        received: usize,
    },
    /// A keyword argument did not match any parameter.
    UnexpectedKeyword {
        /// The name of the function being called.
        function: String,
        /// The offending keyword.
        keyword: String,
    },
    /// A parameter received both a positional and a keyword value.
    MultipleValues {
        /// The name of the function being called.
        function: String,
        /// The parameter bound twice.
        parameter: String,
    },
    /// A value had a different type than the callable required.
    TypeMismatch {
        /// The type the callable required.
        expected: &'static str,
        /// The type of the value actually received.
        found: &'static str,
    },
    /// An error reported by a user callable.
    Raised {
        /// The error message.
        message: String,
    },
}

impl CallError {
    /// Creates a [`CallError::Raised`] from any displayable message.
    pub fn raised(message: impl std::fmt::Display) -> Self {
        Self::Raised {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument {
                function,
                parameter,
            } => write!(
                formatter,
                "{function}() missing required argument: '{parameter}'"
            ),
            Self::TooManyPositional {
                function,
                expected,
                received,
            } => write!(
                formatter,
                "{function}() takes {expected} positional argument{} but {received} {} given",
                if *expected == 1 { "" } else { "s" },
                if *received == 1 { "was" } else { "were" }
            ),
            Self::UnexpectedKeyword { function, keyword } => write!(
                formatter,
                "{function}() got an unexpected keyword argument '{keyword}'"
            ),
            Self::MultipleValues {
                function,
                parameter,
            } => write!(
                formatter,
                "{function}() got multiple values for argument '{parameter}'"
            ),
            Self::TypeMismatch { expected, found } => {
                write!(formatter, "expected {expected}, found {found}")
            }
            Self::Raised { message } => write!(formatter, "{message}"),
        }
    }
}

impl std::error::Error for CallError {}

impl From<&str> for CallError {
    fn from(message: &str) -> Self {
        Self::raised(message)
    }
}

impl From<String> for CallError {
    fn from(message: String) -> Self {
        Self::Raised { message }
    }
}

/// Represents an error when a callable cannot be curried.
///
/// Currying needs a fixed, finite positional arity. The check happens once,
/// when the curried callable is built, never when it is called.
///
/// # Examples
///
/// ```rust
/// use sidekick::CurryError;
///
/// let error = CurryError::Variadic {
///     function: "sum".to_string(),
/// };
/// assert_eq!(format!("{error}"), "cannot curry a variadic function: sum");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurryError {
    /// The signature declares variadic positional, variadic keyword or
    /// keyword-only parameters.
    Variadic {
        /// The name of the rejected function.
        function: String,
    },
    /// The callable carries no declared signature, so its arity is unknown.
    /// Use [`curry_n`](crate::curry_n) to state the arity explicitly.
    UndeclaredSignature {
        /// The name of the rejected function.
        function: String,
    },
}

impl std::fmt::Display for CurryError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variadic { function } => {
                write!(formatter, "cannot curry a variadic function: {function}")
            }
            Self::UndeclaredSignature { function } => write!(
                formatter,
                "cannot curry {function}: no declared signature, use curry_n with an explicit arity"
            ),
        }
    }
}

impl std::error::Error for CurryError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, "f() takes 1 positional argument but 2 were given")]
    #[case(2, 3, "f() takes 2 positional arguments but 3 were given")]
    #[case(0, 1, "f() takes 0 positional arguments but 1 was given")]
    fn test_too_many_positional_display(
        #[case] expected: usize,
        #[case] received: usize,
        #[case] message: &str,
    ) {
        let error = CallError::TooManyPositional {
            function: "f".to_string(),
            expected,
            received,
        };
        assert_eq!(format!("{error}"), message);
    }

    #[rstest]
    fn test_unexpected_keyword_display() {
        let error = CallError::UnexpectedKeyword {
            function: "lambda".to_string(),
            keyword: "z".to_string(),
        };
        assert_eq!(
            format!("{error}"),
            "lambda() got an unexpected keyword argument 'z'"
        );
    }

    #[rstest]
    fn test_raised_from_string_keeps_message() {
        let error = CallError::from(String::from("boom"));
        assert_eq!(
            error,
            CallError::Raised {
                message: "boom".to_string()
            }
        );
    }

    #[rstest]
    fn test_undeclared_signature_display() {
        let error = CurryError::UndeclaredSignature {
            function: "lambda".to_string(),
        };
        assert!(format!("{error}").starts_with("cannot curry lambda"));
    }
}
