//! The callable protocol.
//!
//! Anything a [`Func`](crate::Func) can wrap implements [`Callable`]: it can
//! be called with [`Arguments`] and it can describe itself through a set of
//! named accessors. Every accessor has a default, so a plain closure is a
//! complete callable and a [`NativeFunction`] can carry as much metadata as
//! it likes.
//!
//! # Overview
//!
//! - [`Callable`]: the call protocol plus introspection accessors
//! - [`IntoCallable`]: conversion of closures, functions and wrappers into a
//!   shared callable
//! - [`Signature`]: the declared parameters of a callable
//! - [`BoundArguments`]: arguments matched against a [`Signature`]
//! - [`NativeFunction`]: a closure with a name, docs and a signature
//!
//! # Examples
//!
//! ```rust
//! use sidekick::{Callable, NativeFunction, Signature, args};
//!
//! let add = NativeFunction::with_parameters(
//!     "add",
//!     Signature::positional(["x", "y"]),
//!     |bound| Ok((bound.get_as::<i64>(0)? + bound.get_as::<i64>(1)?).into()),
//! );
//!
//! assert_eq!(add.name(), Some("add"));
//! assert_eq!(add.call(args![1, y = 2]).unwrap().as_int(), Some(3));
//! ```

mod native;
mod signature;

pub use native::NativeFunction;
pub use signature::{BoundArguments, Parameter, ParameterKind, Signature};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CallError;
use crate::value::{Arguments, Value};

/// Declared type annotations, keyed by parameter name (`"return"` for the
/// return type).
pub type Annotations = BTreeMap<String, String>;

/// Named values visible to a callable.
pub type Namespace = BTreeMap<String, Value>;

/// A value that can be called with [`Arguments`].
///
/// Only [`call`](Callable::call) is required. The remaining accessors
/// describe the callable; each returns `None` unless an implementation
/// knows better. [`Func`](crate::Func) reads through these accessors and
/// substitutes documented defaults for the missing ones.
///
/// Implementations must be immutable: calling never changes what a later
/// call observes.
pub trait Callable: Send + Sync + fmt::Debug {
    /// Invokes the callable.
    ///
    /// # Errors
    ///
    /// Whatever the callable reports. Wrappers pass these through untouched.
    fn call(&self, arguments: Arguments) -> Result<Value, CallError>;

    /// The declared name.
    fn name(&self) -> Option<&str> {
        None
    }

    /// The documentation text.
    fn doc(&self) -> Option<&str> {
        None
    }

    /// The path of the module the callable was declared in.
    fn module(&self) -> Option<&str> {
        None
    }

    /// The declared parameters.
    fn signature(&self) -> Option<&Signature> {
        None
    }

    /// Values captured by the callable.
    fn closure(&self) -> Option<&[Value]> {
        None
    }

    /// Declared type annotations.
    fn annotations(&self) -> Option<&Annotations> {
        None
    }

    /// Named values visible to the callable.
    fn globals(&self) -> Option<&Namespace> {
        None
    }
}

/// Conversion into a shared [`Callable`].
///
/// Implemented for closures `Fn(Arguments) -> Result<Value, CallError>`,
/// [`NativeFunction`], [`Curried`](crate::Curried), [`Func`](crate::Func)
/// (which yields its inner callable, so wrappers never nest) and the
/// placeholder marker [`__`](crate::__) (which yields the identity
/// function).
pub trait IntoCallable {
    /// Performs the conversion.
    fn into_callable(self) -> Arc<dyn Callable>;
}

impl<F> IntoCallable for F
where
    F: Fn(Arguments) -> Result<Value, CallError> + Send + Sync + 'static,
{
    fn into_callable(self) -> Arc<dyn Callable> {
        Arc::new(NativeFunction::anonymous(self))
    }
}

impl IntoCallable for NativeFunction {
    fn into_callable(self) -> Arc<dyn Callable> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Answer;

    impl Callable for Answer {
        fn call(&self, _: Arguments) -> Result<Value, CallError> {
            Ok(Value::from(42))
        }
    }

    #[rstest]
    fn test_accessors_default_to_none() {
        let answer = Answer;
        assert_eq!(answer.name(), None);
        assert_eq!(answer.doc(), None);
        assert_eq!(answer.module(), None);
        assert!(answer.signature().is_none());
        assert!(answer.closure().is_none());
        assert!(answer.annotations().is_none());
        assert!(answer.globals().is_none());
    }

    #[rstest]
    fn test_closure_converts_into_anonymous_callable() {
        let callable =
            (|arguments: Arguments| Ok(Value::from(arguments.len() as i64))).into_callable();
        assert_eq!(callable.name(), None);
        assert_eq!(callable.call(crate::args![1, 2]), Ok(Value::from(2)));
    }
}
