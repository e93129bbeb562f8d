//! # sidekick
//!
//! A function wrapper for Rust providing composition, pipelines,
//! placeholder-based partial application and currying.
//!
//! ## Overview
//!
//! Every wrapped callable speaks one dynamic calling convention: it receives
//! an [`Arguments`] bundle of [`Value`]s and returns
//! `Result<Value, CallError>`. On top of that convention the [`Func`]
//! wrapper offers:
//!
//! - **Pipes**: `value | f` calls `f` with `value`
//! - **Composition**: `f >> g` runs `f` then `g`, `f << g` runs `g` then `f`
//! - **Partial application**: [`Func::partial`] and [`Func::at`], with the
//!   [`__`] placeholder marking where the single call argument goes
//! - **Currying**: [`curry`], [`curry_n`] and [`Func::curried`]
//! - **Introspection**: name, docs, defaults, annotations and friends, read
//!   through from the wrapped callable with fixed defaults
//!
//! ## Feature Flags
//!
//! - `derive` (default): the [`function`] attribute, which turns a typed
//!   Rust `fn` into a [`Func`] with a declared signature
//!
//! ## Example
//!
//! ```rust
//! use sidekick::prelude::*;
//!
//! let add = Func::new(NativeFunction::with_parameters(
//!     "add",
//!     Signature::positional(["x", "y"]),
//!     |bound| Ok(Value::from(bound.get_as::<i64>(0)? + bound.get_as::<i64>(1)?)),
//! ));
//!
//! assert_eq!(add.to_string(), "fn(add)");
//! assert_eq!(add.at(1).call1(2).unwrap(), Value::from(3));
//! assert_eq!((2 | &add.partial(args![__, 40])).unwrap(), Value::from(42));
//!
//! let curried = Func::curried(&add).unwrap();
//! assert_eq!(curried.call1(1).unwrap().call1(2).unwrap(), Value::from(3));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Lets `#[function]` expansions name `::sidekick` inside this crate's own tests.
extern crate self as sidekick;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use sidekick::prelude::*;
/// ```
pub mod prelude {
    pub use crate::args;
    pub use crate::callable::*;
    pub use crate::compose::*;
    pub use crate::error::*;
    pub use crate::value::*;

    #[cfg(feature = "derive")]
    pub use crate::function;
}

pub mod callable;
pub mod compose;
pub mod error;
pub mod value;

pub use callable::{
    Annotations, BoundArguments, Callable, IntoCallable, NativeFunction, Namespace, Parameter,
    ParameterKind, Signature,
};
pub use compose::{
    __, Composition, Curried, Func, IntoItems, PartialApplication, Placeholder, Substitution,
    constant, curry, curry_n, flip, func, func_with, identity,
};
pub use error::{CallError, CurryError};
pub use value::{Arguments, FromValue, Value};

/// Turns a typed Rust `fn` into a function returning a [`Func`].
///
/// See the `sidekick-derive` crate for the accepted forms.
#[cfg(feature = "derive")]
pub use sidekick_derive::function;
