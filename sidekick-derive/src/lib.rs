//! Procedural macros for sidekick.
//!
//! This crate provides the [`macro@function`] attribute, which lifts a typed
//! Rust `fn` into a `sidekick::Func` with a declared signature, so it can be
//! curried, partially applied and introspected like any other wrapper.
//!
//! # Example
//!
//! ```rust,ignore
//! use sidekick::{Value, args, function};
//!
//! /// Raises `base` to `exponent`.
//! #[function]
//! fn power(base: i64, #[default(2)] exponent: u32) -> i64 {
//!     base.pow(exponent)
//! }
//!
//! let square = power();
//! assert_eq!(square.call1(7).unwrap(), Value::from(49));
//! assert_eq!(square.call(args![2, exponent = 10]).unwrap(), Value::from(1024));
//! assert_eq!(square.doc(), Some("Raises `base` to `exponent`."));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod function_attribute;

use proc_macro::TokenStream;

/// Lifts a typed function into a `sidekick::Func`.
///
/// The annotated `fn name(...) -> T` is replaced by `fn name() -> Func`
/// with the same visibility and doc comments. The returned wrapper:
///
/// - declares one positional-or-keyword parameter per Rust parameter, named
///   after it
/// - takes defaults from `#[default(expr)]` parameter attributes
/// - converts every argument with `sidekick::FromValue`, reporting
///   `CallError::TypeMismatch` on failure
/// - converts the result with `Value::from`; when the return type is a
///   `Result`, the error side goes through `CallError::from`
/// - reports the function name, its doc comment, `module_path!()` and the
///   parameter and return types as annotations
///
/// # Requirements
///
/// - Parameters must be plain identifiers (`x: i64`, `mut x: i64`)
/// - Parameter types must implement `FromValue`
/// - The return type must convert into `Value`
///
/// Generic, `async`, `unsafe`, `extern` and method functions are rejected
/// at compile time.
///
/// # Example
///
/// ```rust,ignore
/// use sidekick::{CallError, Func, Value, function};
///
/// #[function]
/// fn divide(numerator: f64, denominator: f64) -> Result<f64, CallError> {
///     if denominator == 0.0 {
///         Err(CallError::raised("division by zero"))
///     } else {
///         Ok(numerator / denominator)
///     }
/// }
///
/// let curried = Func::curried(divide()).unwrap();
/// let half = curried.call1(1.0).unwrap();
/// assert_eq!(half.call1(2.0).unwrap(), Value::from(0.5));
/// ```
#[proc_macro_attribute]
pub fn function(attribute: TokenStream, item: TokenStream) -> TokenStream {
    function_attribute::function_impl(attribute, item)
}
