//! Composed callables.

use std::fmt;
use std::sync::Arc;

use crate::callable::Callable;
use crate::error::CallError;
use crate::value::{Arguments, Value};

/// Two callables run one after the other.
///
/// `first` receives every call argument; `second` receives the result of
/// `first` as its only positional argument. Built by [`Func::then`] and
/// [`Func::compose`](crate::Func::compose).
///
/// [`Func::then`]: crate::Func::then
pub struct Composition {
    first: Arc<dyn Callable>,
    second: Arc<dyn Callable>,
}

impl Composition {
    /// Creates `x -> second(first(x))`.
    pub fn new(first: Arc<dyn Callable>, second: Arc<dyn Callable>) -> Self {
        Self { first, second }
    }
}

impl Callable for Composition {
    fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        let intermediate = self.first.call(arguments)?;
        self.second.call(Arguments::from_positional([intermediate]))
    }
}

impl fmt::Debug for Composition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?} >> {:?}", self.first, self.second)
    }
}
