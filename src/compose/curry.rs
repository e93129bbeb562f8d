//! The curry engine.
//!
//! [`curry`] reads the declared [`Signature`] of a callable once and builds a
//! [`Curried`] callable that keeps accepting positional arguments until the
//! declared arity is reached. [`curry_n`] skips the signature and takes the
//! arity from the caller.
//!
//! # Design Decisions
//!
//! Each partial step returns a fresh [`Curried`] over an extended copy of
//! the arguments seen so far. The shared parts (the original callable and
//! the snapshot) live behind `Arc`, so:
//!
//! - a curried callable can be called any number of times
//! - partial applications can branch without sharing state
//! - a curried callable is `Send + Sync`
//!
//! [`Signature`]: crate::Signature

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::{DEFAULT_NAME, Func};
use crate::callable::{Callable, IntoCallable};
use crate::error::{CallError, CurryError};
use crate::value::{Arguments, Value};

/// Converts a callable with a declared, fixed signature into curried form.
///
/// The arity is the number of positional parameters of the declared
/// signature. The check happens here, once; the returned callable never
/// fails for signature reasons.
///
/// # Errors
///
/// - [`CurryError::Variadic`] when the signature declares variadic
///   positional, variadic keyword or keyword-only parameters
/// - [`CurryError::UndeclaredSignature`] when the callable declares no
///   signature at all
///
/// # Examples
///
/// ```rust
/// use sidekick::{Callable, NativeFunction, Signature, Value, args, curry};
///
/// let volume = NativeFunction::with_parameters(
///     "volume",
///     Signature::positional(["width", "height", "depth"]),
///     |bound| {
///         Ok(Value::from(
///             bound.get_as::<i64>(0)? * bound.get_as::<i64>(1)? * bound.get_as::<i64>(2)?,
///         ))
///     },
/// );
///
/// let curried = curry(volume).unwrap();
/// let result = curried.call(args![2]).unwrap().call(args![3, 4]).unwrap();
/// assert_eq!(result, Value::from(24));
/// ```
pub fn curry(callable: impl IntoCallable) -> Result<Curried, CurryError> {
    let function = callable.into_callable();
    let name = || function.name().unwrap_or(DEFAULT_NAME).to_string();

    let Some(signature) = function.signature() else {
        debug!(function = %name(), "curry rejected: no declared signature");
        return Err(CurryError::UndeclaredSignature { function: name() });
    };
    if !signature.is_fixed() {
        debug!(function = %name(), "curry rejected: variadic signature");
        return Err(CurryError::Variadic { function: name() });
    }

    let arity = signature.arity();
    Ok(Curried::new(function, arity))
}

/// Converts a callable into curried form with an explicit arity.
///
/// No signature is consulted, so this works for anonymous closures.
///
/// # Examples
///
/// ```rust
/// use sidekick::{Callable, Value, args, curry_n};
///
/// let sum = curry_n(
///     |arguments: sidekick::Arguments| -> Result<Value, sidekick::CallError> {
///         let mut total = 0;
///         for index in 0..arguments.positional_len() {
///             total += arguments.get_as::<i64>(index)?;
///         }
///         Ok(Value::from(total))
///     },
///     3,
/// );
///
/// assert_eq!(sum.call(args![1]).unwrap().call(args![2]).unwrap().call(args![3]).unwrap(), Value::from(6));
/// ```
pub fn curry_n(callable: impl IntoCallable, arity: usize) -> Curried {
    Curried::new(callable.into_callable(), arity)
}

/// A callable collecting positional arguments until its arity is reached.
///
/// Calling with arguments that keep the running total below the arity
/// returns a new `Curried` (as [`Value::Func`]) remembering everything seen
/// so far. Once the total reaches or passes the arity, the original callable
/// runs with all arguments in call order. Surplus arguments are forwarded,
/// not dropped.
pub struct Curried {
    function: Arc<dyn Callable>,
    arity: usize,
    applied: Arc<[Value]>,
}

impl Curried {
    fn new(function: Arc<dyn Callable>, arity: usize) -> Self {
        Self {
            function,
            arity,
            applied: Arc::from([]),
        }
    }

    /// The number of positional arguments the original callable needs.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// The arguments collected so far.
    pub fn applied(&self) -> &[Value] {
        &self.applied
    }

    /// The number of arguments still missing.
    pub fn remaining(&self) -> usize {
        self.arity.saturating_sub(self.applied.len())
    }
}

impl Callable for Curried {
    fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        if let Some((keyword, _)) = arguments.keywords().next() {
            return Err(CallError::UnexpectedKeyword {
                function: DEFAULT_NAME.to_string(),
                keyword: keyword.to_string(),
            });
        }

        let (positional, _) = arguments.into_parts();
        if self.applied.len() + positional.len() >= self.arity {
            let all: Arguments = self.applied.iter().cloned().chain(positional).collect();
            trace!(
                arity = self.arity,
                supplied = all.positional_len(),
                "curried call saturated"
            );
            return self.function.call(all);
        }

        let applied: Arc<[Value]> = self.applied.iter().cloned().chain(positional).collect();
        Ok(Value::Func(Func::from_callable(Self {
            function: Arc::clone(&self.function),
            arity: self.arity,
            applied,
        })))
    }

    fn closure(&self) -> Option<&[Value]> {
        Some(&self.applied)
    }
}

impl IntoCallable for Curried {
    fn into_callable(self) -> Arc<dyn Callable> {
        Arc::new(self)
    }
}

impl fmt::Debug for Curried {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "curry({:?}, {}/{})",
            self.function,
            self.applied.len(),
            self.arity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::callable::{NativeFunction, Signature};
    use rstest::rstest;

    fn collect() -> NativeFunction {
        NativeFunction::new("collect", |arguments| {
            Ok(Value::from(arguments.positional().to_vec()))
        })
    }

    #[rstest]
    fn test_curry_requires_declared_signature() {
        let result = curry(collect());
        assert_eq!(
            result.err(),
            Some(CurryError::UndeclaredSignature {
                function: "collect".to_string()
            })
        );
    }

    #[rstest]
    #[case(Signature::positional(["a"]).variadic_positional("rest"))]
    #[case(Signature::positional(["a"]).variadic_keyword("options"))]
    #[case(Signature::positional(["a"]).keyword_only("flag"))]
    fn test_curry_rejects_non_fixed_signatures(#[case] signature: Signature) {
        let result = curry(collect().with_signature(signature));
        assert_eq!(
            result.err(),
            Some(CurryError::Variadic {
                function: "collect".to_string()
            })
        );
    }

    #[rstest]
    fn test_remaining_tracks_snapshot() {
        let curried = curry_n(collect(), 3);
        assert_eq!(curried.remaining(), 3);
        let step = curried.call(args![1]).unwrap();
        let Some(function) = step.as_func() else {
            panic!("expected a partially applied function");
        };
        assert_eq!(function.closure(), Some(&[Value::from(1)][..]));
        assert!(curried.applied().is_empty());
    }

    #[rstest]
    fn test_zero_arity_calls_immediately() {
        let curried = curry_n(collect(), 0);
        assert_eq!(curried.call(args![]), Ok(Value::from(Vec::<Value>::new())));
    }

    #[rstest]
    fn test_keywords_are_rejected() {
        let curried = curry_n(collect(), 2);
        assert_eq!(
            curried.call(args![1, extra = 2]),
            Err(CallError::UnexpectedKeyword {
                function: "lambda".to_string(),
                keyword: "extra".to_string()
            })
        );
    }

    #[rstest]
    fn test_debug_shows_progress() {
        let curried = curry_n(collect(), 2);
        assert_eq!(format!("{curried:?}"), "curry(<native function collect>, 0/2)");
    }
}
