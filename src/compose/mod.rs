//! Function composition utilities.
//!
//! This module provides the [`Func`] wrapper and the combinators behind its
//! operators. It enables declarative, point-free programming patterns that
//! are common in functional languages.
//!
//! # Overview
//!
//! - [`Func`]: the wrapper, with `|` (pipe), `>>` and `<<` (composition)
//! - [`Func::partial`] / [`Func::at`]: partial application with placeholder support
//! - [`curry`] / [`curry_n`]: convert a function to curried form
//! - [`func`] / [`func_with`]: lift a callable (and optionally fix arguments)
//!
//! # Helper Functions
//!
//! - [`identity`]: The identity function - returns its argument unchanged
//! - [`constant`]: Creates a function that always returns the same value
//! - [`flip`]: Swaps the first two arguments of a function
//!
//! # Examples
//!
//! ## Pipeline (left-to-right)
//!
//! ```
//! use sidekick::{Func, Value};
//!
//! let double = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? * 2)));
//! let add_one = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? + 1)));
//!
//! let result = (5 | &double).and_then(|value| value | &add_one);
//! assert_eq!(result.unwrap(), Value::from(11));
//! ```
//!
//! ## Composition
//!
//! ```
//! use sidekick::{Func, Value};
//!
//! let double = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? * 2)));
//! let add_one = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? + 1)));
//!
//! // (f >> g)(x) = g(f(x))
//! assert_eq!((&double >> &add_one).call1(5).unwrap(), Value::from(11));
//! // (f << g)(x) = f(g(x))
//! assert_eq!((&double << &add_one).call1(5).unwrap(), Value::from(12));
//! ```
//!
//! ## Partial Application
//!
//! ```
//! use sidekick::{Func, Value, args};
//!
//! let divide = Func::from_fn(|arguments| {
//!     Ok(Value::from(arguments.get_as::<f64>(0)? / arguments.get_as::<f64>(1)?))
//! });
//!
//! let half = divide.partial(args![__, 2.0]);
//! assert_eq!(half.call1(10.0).unwrap(), Value::from(5.0));
//! ```
//!
//! ## Currying
//!
//! ```
//! use sidekick::{Callable, Value, args, curry_n};
//!
//! let add = curry_n(
//!     |arguments: sidekick::Arguments| -> Result<Value, sidekick::CallError> {
//!         Ok(Value::from(arguments.get_as::<i64>(0)? + arguments.get_as::<i64>(1)?))
//!     },
//!     2,
//! );
//! let add_five = add.call(args![5]).unwrap();
//! assert_eq!(add_five.call1(3).unwrap(), Value::from(8));
//! ```
//!
//! # Laws
//!
//! ## Composition Laws
//!
//! - **Associativity**: `(f >> g) >> h == f >> (g >> h)`
//! - **Identity**: `identity() >> f == f == f >> identity()`
//! - **Mirror**: `f >> g == g << f`
//!
//! ## Pipe Laws
//!
//! - **Equivalence**: `x | f == f(x)`
//!
//! ## Curry Laws
//!
//! - **Application order**: `curry(f)(a)(b)(c) == curry(f)(a, b)(c) == curry(f)(a, b, c) == f(a, b, c)`

mod composition;
mod curry;
mod func;
mod partial;
mod utils;

/// The name reported for callables that declare none.
pub(crate) const DEFAULT_NAME: &str = "lambda";

pub use composition::Composition;
pub use curry::{Curried, curry, curry_n};
pub use func::{Func, IntoItems, func, func_with};
pub use partial::{PartialApplication, Substitution};
pub use utils::{__, Placeholder, constant, flip, identity};
