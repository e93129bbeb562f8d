//! Helper functions (combinators) and the placeholder marker.
//!
//! This module provides fundamental combinators that are commonly used
//! in functional programming, lifted into [`Func`]:
//!
//! - [`identity`]: The identity function (I combinator)
//! - [`constant`]: Creates a function that always returns the same value (K combinator)
//! - [`flip`]: Swaps the first two arguments of a function (C combinator)
//!
//! It also defines [`Placeholder`] and its single value [`__`].

use std::sync::Arc;

use super::Func;
use crate::callable::{Callable, IntoCallable, NativeFunction, Signature};
use crate::error::CallError;
use crate::value::{Arguments, Value};

/// Returns a function that returns its single argument unchanged.
///
/// The identity function is the unit element of composition:
/// `identity() >> f` and `f >> identity()` behave like `f`.
///
/// # Examples
///
/// ```
/// use sidekick::{Value, identity};
///
/// assert_eq!(identity().call1(42).unwrap(), Value::from(42));
/// ```
pub fn identity() -> Func {
    Func::new(NativeFunction::with_parameters(
        "identity",
        Signature::positional(["value"]),
        |mut bound| Ok(bound.take(0)),
    ))
}

/// Returns a function that ignores its arguments and returns `value`.
///
/// Also known as the K combinator in combinatory logic.
///
/// # Examples
///
/// ```
/// use sidekick::{Value, args, constant};
///
/// let always_five = constant(5);
/// assert_eq!(always_five.call1("ignored").unwrap(), Value::from(5));
/// assert_eq!(always_five.call(args![1, 2, key = 3]).unwrap(), Value::from(5));
/// ```
pub fn constant(value: impl Into<Value>) -> Func {
    let value = value.into();
    Func::new(NativeFunction::new("constant", move |_| Ok(value.clone())))
}

/// Swaps the first two positional arguments of `callable`.
///
/// Remaining positional arguments and all keywords pass through.
///
/// # Laws
///
/// - **Double flip identity**: `flip(flip(f)) == f`
/// - **Flip definition**: `flip(f)(a, b) == f(b, a)`
///
/// # Examples
///
/// ```
/// use sidekick::{Func, Value, args, flip};
///
/// let subtract = Func::from_fn(|arguments| {
///     Ok(Value::from(arguments.get_as::<i64>(0)? - arguments.get_as::<i64>(1)?))
/// });
///
/// assert_eq!(flip(&subtract).call(args![10, 3]).unwrap(), Value::from(-7));
/// ```
pub fn flip(callable: impl IntoCallable) -> Func {
    let function = callable.into_callable();
    Func::new(NativeFunction::new("flip", move |arguments: Arguments| {
        let (positional, keywords) = arguments.into_parts();
        if positional.len() < 2 {
            return Err(CallError::MissingArgument {
                function: "flip".to_string(),
                parameter: (if positional.is_empty() { "x" } else { "y" }).to_string(),
            });
        }
        let mut swapped = positional;
        swapped.swap(0, 1);
        let mut flipped = Arguments::from_positional(swapped);
        for (name, value) in keywords {
            flipped.set_keyword(&name, value);
        }
        function.call(flipped)
    }))
}

/// Placeholder marker type for partial application.
///
/// There is exactly one placeholder value, [`__`]. Inside the
/// [`args!`](crate::args) macro it can be written as a bare `__`.
///
/// Wrapping the placeholder itself in a [`Func`] yields the identity
/// function: a wrapper never stores a placeholder.
///
/// # Examples
///
/// ```
/// use sidekick::{Func, Value, __, args};
///
/// let add = Func::from_fn(|arguments| {
///     Ok(Value::from(arguments.get_as::<i64>(0)? + arguments.get_as::<i64>(1)?))
/// });
///
/// let add_to_ten = add.partial(args![__, 10]);
/// assert_eq!(add_to_ten.call1(3).unwrap(), Value::from(13));
///
/// assert_eq!(Func::new(__).call1(7).unwrap(), Value::from(7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder;

/// The placeholder constant for partial application.
///
/// Named `__` (double underscore) because `_` is not a valid identifier.
#[allow(non_upper_case_globals)]
pub const __: Placeholder = Placeholder;

impl IntoCallable for Placeholder {
    fn into_callable(self) -> Arc<dyn Callable> {
        identity().into_callable()
    }
}
