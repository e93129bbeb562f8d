//! The [`Func`] wrapper and its operator protocol.

use std::fmt;
use std::ops::{BitOr, Shl, Shr};
use std::sync::Arc;

use super::DEFAULT_NAME;
use super::Placeholder;
use super::composition::Composition;
use super::curry::{Curried, curry};
use super::partial::PartialApplication;
use crate::callable::{Annotations, Callable, IntoCallable, NativeFunction, Namespace, Signature};
use crate::error::{CallError, CurryError};
use crate::value::{Arguments, Value};

static EMPTY_ANNOTATIONS: Annotations = Annotations::new();
static EMPTY_NAMESPACE: Namespace = Namespace::new();

/// A function wrapper with composition, pipe, partial application and
/// currying operators.
///
/// A `Func` holds exactly one shared, immutable callable. Every operator
/// returns a new `Func` around a newly built callable, so cloning and
/// sharing a `Func` is always safe.
///
/// # Operators
///
/// | Expression        | Meaning                                   |
/// |-------------------|-------------------------------------------|
/// | `value \| f`      | `f.call1(value)`                          |
/// | `f >> g`          | `x -> g(f(x))`, see [`Func::then`]        |
/// | `f << g`          | `x -> f(g(x))`, see [`Func::compose`]     |
/// | `g >> f`          | `x -> f(g(x))` for a bare callable `g`    |
/// | `g << f`          | `x -> g(f(x))` for a bare callable `g`    |
///
/// Integers pipe as `i64`, so an unsuffixed literal needs no annotation.
///
/// # Examples
///
/// ```rust
/// use sidekick::{Func, Value, args};
///
/// let double = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? * 2)));
/// let increment = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? + 1)));
///
/// assert_eq!((5 | &double).unwrap(), Value::from(10));
/// assert_eq!((&double >> &increment).call1(5).unwrap(), Value::from(11));
/// assert_eq!((&double << &increment).call1(5).unwrap(), Value::from(12));
/// ```
#[derive(Clone)]
pub struct Func {
    callable: Arc<dyn Callable>,
}

impl Func {
    /// Wraps a callable.
    ///
    /// Wrapping another `Func` shares its inner callable. Wrapping the
    /// placeholder marker [`__`](crate::__) yields the identity function.
    pub fn new(callable: impl IntoCallable) -> Self {
        Self {
            callable: callable.into_callable(),
        }
    }

    /// Wraps a closure over raw [`Arguments`].
    pub fn from_fn<F>(body: F) -> Self
    where
        F: Fn(Arguments) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::new(body)
    }

    /// Wraps any [`Callable`] implementation.
    pub fn from_callable<C: Callable + 'static>(callable: C) -> Self {
        Self {
            callable: Arc::new(callable),
        }
    }

    /// Builds the curried form of `callable` and wraps it.
    ///
    /// # Errors
    ///
    /// See [`curry`].
    pub fn curried(callable: impl IntoCallable) -> Result<Self, CurryError> {
        curry(callable).map(Self::from_callable)
    }

    /// Returns the wrapped callable.
    pub fn inner(&self) -> &Arc<dyn Callable> {
        &self.callable
    }

    /// Calls the wrapped callable with `arguments`.
    ///
    /// # Errors
    ///
    /// Whatever the wrapped callable returns, unchanged.
    pub fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        self.callable.call(arguments)
    }

    /// Calls the wrapped callable with a single positional argument.
    ///
    /// # Errors
    ///
    /// Whatever the wrapped callable returns, unchanged.
    pub fn call1(&self, argument: impl Into<Value>) -> Result<Value, CallError> {
        self.call(Arguments::from_positional([argument.into()]))
    }

    /// Forward composition: the result runs `self` with the call arguments,
    /// then `other` with that result. Same as `self >> other`.
    #[must_use]
    pub fn then(&self, other: impl IntoCallable) -> Self {
        Self::from_callable(Composition::new(
            Arc::clone(&self.callable),
            other.into_callable(),
        ))
    }

    /// Backward composition: the result runs `other` with the call
    /// arguments, then `self` with that result. Same as `self << other`.
    #[must_use]
    pub fn compose(&self, other: impl IntoCallable) -> Self {
        Self::from_callable(Composition::new(
            other.into_callable(),
            Arc::clone(&self.callable),
        ))
    }

    /// Partially applies `arguments`.
    ///
    /// Without placeholders this is ordinary partial application. With
    /// placeholders the result takes exactly one argument, which replaces
    /// every placeholder. See [`PartialApplication`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sidekick::{Func, NativeFunction, Signature, Value, args};
    ///
    /// let subtract = Func::new(NativeFunction::with_parameters(
    ///     "subtract",
    ///     Signature::positional(["x", "y"]),
    ///     |bound| Ok(Value::from(bound.get_as::<i64>(0)? - bound.get_as::<i64>(1)?)),
    /// ));
    ///
    /// assert_eq!(subtract.partial(args![10]).call1(3).unwrap(), Value::from(7));
    /// assert_eq!(subtract.partial(args![__, 10]).call1(3).unwrap(), Value::from(-7));
    /// assert_eq!(subtract.partial(args![y = __, x = 1]).call1(3).unwrap(), Value::from(-2));
    /// ```
    #[must_use]
    pub fn partial(&self, arguments: Arguments) -> Self {
        Self::from_callable(PartialApplication::new(
            Arc::clone(&self.callable),
            arguments,
        ))
    }

    /// Indexed partial application: a single item is one positional
    /// argument, a tuple is several.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sidekick::{Func, Value};
    ///
    /// let add = Func::from_fn(|arguments| {
    ///     Ok(Value::from(arguments.get_as::<i64>(0)? + arguments.get_as::<i64>(1)?))
    /// });
    ///
    /// assert_eq!(add.at(1).call1(2).unwrap(), Value::from(3));
    /// assert_eq!(add.at((1, 2)).call(Default::default()).unwrap(), Value::from(3));
    /// ```
    #[must_use]
    pub fn at(&self, items: impl IntoItems) -> Self {
        self.partial(items.into_items())
    }

    /// Binds `receiver` as the first positional argument, the way a method
    /// is bound to its instance.
    ///
    /// The receiver is bound as is; a placeholder receiver is not
    /// substituted.
    #[must_use]
    pub fn bind(&self, receiver: impl Into<Value>) -> Self {
        Self::from_callable(PartialApplication::plain(
            Arc::clone(&self.callable),
            Arguments::from_positional([receiver.into()]),
        ))
    }

    /// The name of the wrapped callable, or `"lambda"`.
    pub fn name(&self) -> &str {
        self.callable.name().unwrap_or(DEFAULT_NAME)
    }

    /// The documentation of the wrapped callable.
    pub fn doc(&self) -> Option<&str> {
        self.callable.doc()
    }

    /// The defaults of the positional parameters of the wrapped callable.
    pub fn defaults(&self) -> Option<Vec<Value>> {
        self.callable.signature().and_then(Signature::defaults)
    }

    /// The defaults of the keyword-only parameters of the wrapped callable.
    pub fn keyword_defaults(&self) -> Option<std::collections::BTreeMap<String, Value>> {
        self.callable
            .signature()
            .and_then(Signature::keyword_defaults)
    }

    /// The values captured by the wrapped callable.
    pub fn closure(&self) -> Option<&[Value]> {
        self.callable.closure()
    }

    /// The declared signature of the wrapped callable.
    pub fn code(&self) -> Option<&Signature> {
        self.callable.signature()
    }

    /// The annotations of the wrapped callable, or an empty map.
    pub fn annotations(&self) -> &Annotations {
        self.callable.annotations().unwrap_or(&EMPTY_ANNOTATIONS)
    }

    /// The module of the wrapped callable, or `""`.
    pub fn module(&self) -> &str {
        self.callable.module().unwrap_or("")
    }

    /// The globals of the wrapped callable, or an empty map.
    pub fn globals(&self) -> &Namespace {
        self.callable.globals().unwrap_or(&EMPTY_NAMESPACE)
    }
}

impl Callable for Func {
    fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        self.callable.call(arguments)
    }

    fn name(&self) -> Option<&str> {
        self.callable.name()
    }

    fn doc(&self) -> Option<&str> {
        self.callable.doc()
    }

    fn module(&self) -> Option<&str> {
        self.callable.module()
    }

    fn signature(&self) -> Option<&Signature> {
        self.callable.signature()
    }

    fn closure(&self) -> Option<&[Value]> {
        self.callable.closure()
    }

    fn annotations(&self) -> Option<&Annotations> {
        self.callable.annotations()
    }

    fn globals(&self) -> Option<&Namespace> {
        self.callable.globals()
    }
}

impl IntoCallable for Func {
    fn into_callable(self) -> Arc<dyn Callable> {
        self.callable
    }
}

impl IntoCallable for &Func {
    fn into_callable(self) -> Arc<dyn Callable> {
        Arc::clone(&self.callable)
    }
}

impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callable, &other.callable)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.callable.name() {
            Some(name) => write!(formatter, "fn({name})"),
            None => write!(formatter, "fn({:?})", self.callable),
        }
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Func").field(&self.callable).finish()
    }
}

/// Lifts a callable into a [`Func`].
///
/// # Examples
///
/// ```rust
/// use sidekick::{Value, func};
///
/// let negate = func(|arguments: sidekick::Arguments| -> Result<Value, sidekick::CallError> {
///     Ok(Value::from(-arguments.get_as::<i64>(0)?))
/// });
/// assert_eq!(negate.call1(4).unwrap(), Value::from(-4));
/// ```
pub fn func(callable: impl IntoCallable) -> Func {
    Func::new(callable)
}

/// Lifts a callable into a [`Func`] and partially applies `arguments` in
/// one step. With empty `arguments` this is [`func`].
pub fn func_with(callable: impl IntoCallable, arguments: Arguments) -> Func {
    let function = Func::new(callable);
    if arguments.is_empty() {
        function
    } else {
        function.partial(arguments)
    }
}

/// Items accepted by [`Func::at`].
///
/// A single value becomes one positional argument. A tuple becomes one
/// positional argument per element.
pub trait IntoItems {
    /// Converts the items into positional arguments.
    fn into_items(self) -> Arguments;
}

macro_rules! impl_into_items_single {
    ($($source:ty),* $(,)?) => {
        $(
            impl IntoItems for $source {
                fn into_items(self) -> Arguments {
                    Arguments::from_positional([Value::from(self)])
                }
            }
        )*
    };
}

impl_into_items_single!(
    Value,
    bool,
    i32,
    i64,
    u32,
    f64,
    &str,
    String,
    Func,
    super::Placeholder,
);

impl<T: Into<Value>> IntoItems for Vec<T> {
    fn into_items(self) -> Arguments {
        Arguments::from_positional([Value::from(self)])
    }
}

macro_rules! impl_into_items_tuple {
    ($($element:ident),+) => {
        impl<$($element: Into<Value>),+> IntoItems for ($($element,)+) {
            #[allow(non_snake_case)]
            fn into_items(self) -> Arguments {
                let ($($element,)+) = self;
                Arguments::from_positional([$(Into::<Value>::into($element)),+])
            }
        }
    };
}

impl_into_items_tuple!(A);
impl_into_items_tuple!(A, B);
impl_into_items_tuple!(A, B, C);
impl_into_items_tuple!(A, B, C, D);
impl_into_items_tuple!(A, B, C, D, E);
impl_into_items_tuple!(A, B, C, D, E, F);

impl<C: IntoCallable> Shr<C> for Func {
    type Output = Self;

    fn shr(self, other: C) -> Self {
        self.then(other)
    }
}

impl<C: IntoCallable> Shr<C> for &Func {
    type Output = Func;

    fn shr(self, other: C) -> Func {
        self.then(other)
    }
}

impl<C: IntoCallable> Shl<C> for Func {
    type Output = Self;

    fn shl(self, other: C) -> Self {
        self.compose(other)
    }
}

impl<C: IntoCallable> Shl<C> for &Func {
    type Output = Func;

    fn shl(self, other: C) -> Func {
        self.compose(other)
    }
}

// A bare callable on the left of an operator defers to the `Func` on the right.
macro_rules! impl_reflected_composition {
    ($($source:ty),* $(,)?) => {
        $(
            impl Shr<Func> for $source {
                type Output = Func;

                fn shr(self, function: Func) -> Func {
                    function.compose(self)
                }
            }

            impl Shr<&Func> for $source {
                type Output = Func;

                fn shr(self, function: &Func) -> Func {
                    function.compose(self)
                }
            }

            impl Shl<Func> for $source {
                type Output = Func;

                fn shl(self, function: Func) -> Func {
                    function.then(self)
                }
            }

            impl Shl<&Func> for $source {
                type Output = Func;

                fn shl(self, function: &Func) -> Func {
                    function.then(self)
                }
            }
        )*
    };
}

impl_reflected_composition!(NativeFunction, Curried, Placeholder);

macro_rules! impl_pipe {
    ($($source:ty),* $(,)?) => {
        $(
            impl BitOr<Func> for $source {
                type Output = Result<Value, CallError>;

                fn bitor(self, function: Func) -> Self::Output {
                    function.call1(self)
                }
            }

            impl BitOr<&Func> for $source {
                type Output = Result<Value, CallError>;

                fn bitor(self, function: &Func) -> Self::Output {
                    function.call1(self)
                }
            }
        )*
    };
}

impl_pipe!(Value, bool, i64, f64, String);

impl BitOr<Func> for &str {
    type Output = Result<Value, CallError>;

    fn bitor(self, function: Func) -> Self::Output {
        function.call1(self)
    }
}

impl BitOr<&Func> for &str {
    type Output = Result<Value, CallError>;

    fn bitor(self, function: &Func) -> Self::Output {
        function.call1(self)
    }
}
