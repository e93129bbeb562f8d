//! Closure-backed callables with metadata.

use std::fmt;
use std::sync::Arc;

use super::{Annotations, BoundArguments, Callable, Namespace, Signature};
use crate::error::CallError;
use crate::value::{Arguments, Value};

type RawBody = dyn Fn(Arguments) -> Result<Value, CallError> + Send + Sync;
type BoundBody = dyn Fn(BoundArguments) -> Result<Value, CallError> + Send + Sync;

#[derive(Clone)]
enum Body {
    Raw(Arc<RawBody>),
    Bound(Arc<BoundBody>),
}

/// A Rust closure presented as a [`Callable`], together with the metadata
/// generic tooling expects of a function.
///
/// A body built with [`NativeFunction::new`] or [`NativeFunction::anonymous`]
/// receives the raw [`Arguments`]. A body built with
/// [`NativeFunction::with_parameters`] receives [`BoundArguments`]: the
/// arguments are matched against the signature before the body runs, so
/// missing or surplus arguments never reach it.
///
/// # Examples
///
/// ```rust
/// use sidekick::{Callable, CallError, NativeFunction, Signature, args};
///
/// let divide = NativeFunction::with_parameters(
///     "divide",
///     Signature::positional(["numerator", "denominator"]),
///     |bound| {
///         let denominator = bound.get_as::<f64>(1)?;
///         if denominator == 0.0 {
///             return Err(CallError::raised("division by zero"));
///         }
///         Ok((bound.get_as::<f64>(0)? / denominator).into())
///     },
/// )
/// .with_doc("Divides two numbers.");
///
/// assert_eq!(divide.call(args![6.0, 3.0]).unwrap().as_float(), Some(2.0));
/// assert!(divide.call(args![1.0]).is_err());
/// assert_eq!(divide.doc(), Some("Divides two numbers."));
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name: Option<Arc<str>>,
    doc: Option<Arc<str>>,
    module: Option<Arc<str>>,
    signature: Option<Signature>,
    annotations: Option<Annotations>,
    globals: Option<Namespace>,
    body: Body,
}

impl NativeFunction {
    fn from_body(name: Option<&str>, signature: Option<Signature>, body: Body) -> Self {
        Self {
            name: name.map(Arc::from),
            doc: None,
            module: None,
            signature,
            annotations: None,
            globals: None,
            body,
        }
    }

    /// Creates a named function receiving raw arguments.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(Arguments) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::from_body(Some(name), None, Body::Raw(Arc::new(body)))
    }

    /// Creates a function without a name receiving raw arguments.
    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(Arguments) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::from_body(None, None, Body::Raw(Arc::new(body)))
    }

    /// Creates a named function whose arguments are bound to `signature`
    /// before `body` runs.
    pub fn with_parameters<F>(name: &str, signature: Signature, body: F) -> Self
    where
        F: Fn(BoundArguments) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self::from_body(Some(name), Some(signature), Body::Bound(Arc::new(body)))
    }

    /// Declares the signature.
    ///
    /// For a function built with [`NativeFunction::with_parameters`] this
    /// also replaces the signature arguments are bound against.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(Arc::from(doc));
        self
    }

    /// Sets the module path.
    #[must_use]
    pub fn with_module(mut self, module: &str) -> Self {
        self.module = Some(Arc::from(module));
        self
    }

    /// Records the annotated type of a parameter (`"return"` for the return
    /// type).
    #[must_use]
    pub fn with_annotation(mut self, parameter: &str, annotation: &str) -> Self {
        self.annotations
            .get_or_insert_with(Annotations::new)
            .insert(parameter.to_string(), annotation.to_string());
        self
    }

    /// Makes a named value visible through [`Callable::globals`].
    #[must_use]
    pub fn with_global(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.globals
            .get_or_insert_with(Namespace::new)
            .insert(name.to_string(), value.into());
        self
    }
}

impl Callable for NativeFunction {
    fn call(&self, arguments: Arguments) -> Result<Value, CallError> {
        match &self.body {
            Body::Raw(body) => body(arguments),
            Body::Bound(body) => {
                let bound = match &self.signature {
                    Some(signature) => signature.bind(self.display_name(), arguments)?,
                    None => Signature::new().bind(self.display_name(), arguments)?,
                };
                body(bound)
            }
        }
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }

    fn globals(&self) -> Option<&Namespace> {
        self.globals.as_ref()
    }
}

impl NativeFunction {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(crate::compose::DEFAULT_NAME)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(formatter, "<native function {name}>"),
            None => write!(formatter, "<native function>"),
        }
    }
}
