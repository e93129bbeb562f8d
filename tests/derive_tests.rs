//! Integration tests for the `#[function]` attribute.
//!
//! These tests verify that lifted functions:
//! - declare a signature matching their Rust parameters
//! - convert arguments and results through `Value`
//! - report their name, doc comment, module and annotations
//! - work with every combinator

use rstest::rstest;
use sidekick::{CallError, Func, Value, args, curry, function};

/// Adds two integers.
#[function]
fn add(x: i64, y: i64) -> i64 {
    x + y
}

/// Raises `base` to `exponent`.
///
/// The exponent defaults to two.
#[function]
pub fn power(base: i64, #[default(2)] exponent: u32) -> i64 {
    base.pow(exponent)
}

#[function]
fn divide(numerator: f64, denominator: f64) -> Result<f64, CallError> {
    if denominator == 0.0 {
        Err(CallError::raised("division by zero"))
    } else {
        Ok(numerator / denominator)
    }
}

#[function]
fn parse(text: String) -> Result<i64, String> {
    text.trim().parse().map_err(|_| format!("not a number: {text}"))
}

#[function]
fn shout(mut text: String, #[default("!")] suffix: String) -> String {
    text.make_ascii_uppercase();
    text + &suffix
}

#[function]
fn nothing() {}

#[function]
fn factorial(n: i64) -> i64 {
    if n <= 1 { 1 } else { n * factorial(n - 1) }
}

// =============================================================================
// Calling
// =============================================================================

mod call_tests {
    use super::*;

    #[rstest]
    fn test_positional_and_keyword() {
        assert_eq!(add().call(args![1, 2]), Ok(Value::from(3)));
        assert_eq!(add().call(args![y = 1, x = 2]), Ok(Value::from(3)));
    }

    #[rstest]
    fn test_default_parameter() {
        assert_eq!(power().call1(7), Ok(Value::from(49)));
        assert_eq!(power().call(args![2, exponent = 10]), Ok(Value::from(1024)));
    }

    #[rstest]
    fn test_binding_errors() {
        assert_eq!(
            add().call(args![1]),
            Err(CallError::MissingArgument {
                function: "add".to_string(),
                parameter: "y".to_string()
            })
        );
        assert_eq!(
            add().call(args![1, 2, 3]),
            Err(CallError::TooManyPositional {
                function: "add".to_string(),
                expected: 2,
                received: 3
            })
        );
        assert_eq!(
            add().call(args![1, x = 2]),
            Err(CallError::MultipleValues {
                function: "add".to_string(),
                parameter: "x".to_string()
            })
        );
    }

    #[rstest]
    fn test_argument_type_mismatch() {
        assert_eq!(
            add().call(args![1, "two"]),
            Err(CallError::TypeMismatch {
                expected: "int",
                found: "str"
            })
        );
    }

    #[rstest]
    fn test_result_return() {
        assert_eq!(divide().call(args![1.0, 4.0]), Ok(Value::from(0.25)));
        assert_eq!(
            divide().call(args![1.0, 0.0]),
            Err(CallError::raised("division by zero"))
        );
    }

    #[rstest]
    fn test_string_error_becomes_raised() {
        assert_eq!(parse().call1(" 12 "), Ok(Value::from(12)));
        assert_eq!(
            parse().call1("twelve"),
            Err(CallError::raised("not a number: twelve"))
        );
    }

    #[rstest]
    fn test_mut_parameter_and_string_default() {
        assert_eq!(shout().call1("hey"), Ok(Value::from("HEY!")));
        assert_eq!(
            shout().call(args!["hey", suffix = "?"]),
            Ok(Value::from("HEY?"))
        );
    }

    #[rstest]
    fn test_unit_return() {
        assert_eq!(nothing().call(args![]), Ok(Value::None));
    }

    #[rstest]
    fn test_recursion_uses_typed_function() {
        assert_eq!(factorial().call1(5), Ok(Value::from(120)));
    }
}

// =============================================================================
// Introspection
// =============================================================================

mod introspection_tests {
    use super::*;

    #[rstest]
    fn test_name_and_display() {
        assert_eq!(add().name(), "add");
        assert_eq!(add().to_string(), "fn(add)");
    }

    #[rstest]
    fn test_doc_comment() {
        assert_eq!(add().doc(), Some("Adds two integers."));
        assert_eq!(
            power().doc(),
            Some("Raises `base` to `exponent`.\n\nThe exponent defaults to two.")
        );
        assert_eq!(divide().doc(), None);
    }

    #[rstest]
    fn test_module_path() {
        assert_eq!(add().module(), "derive_tests");
    }

    #[rstest]
    fn test_defaults() {
        assert_eq!(power().defaults(), Some(vec![Value::from(2)]));
        assert_eq!(add().defaults(), None);
        assert_eq!(add().keyword_defaults(), None);
    }

    #[rstest]
    fn test_annotations() {
        let function = divide();
        let annotations = function.annotations();
        assert_eq!(annotations.get("numerator").map(String::as_str), Some("f64"));
        assert_eq!(
            annotations.get("return").map(String::as_str),
            Some("Result<f64,CallError>")
        );
        assert_eq!(
            nothing().annotations().get("return").map(String::as_str),
            Some("()")
        );
    }

    #[rstest]
    fn test_signature() {
        let function = power();
        let Some(code) = function.code() else {
            panic!("expected a declared signature");
        };
        assert_eq!(code.positional_names().collect::<Vec<_>>(), ["base", "exponent"]);
    }
}

// =============================================================================
// Combinators
// =============================================================================

mod combinator_tests {
    use super::*;

    #[rstest]
    fn test_curry_lifted_function() {
        let curried = Func::curried(add()).unwrap();
        let add_one = curried.call1(1).unwrap();
        assert_eq!(add_one.call1(41), Ok(Value::from(42)));
    }

    #[rstest]
    fn test_curry_counts_defaulted_parameters() {
        let curried = curry(power()).unwrap();
        assert_eq!(curried.arity(), 2);
    }

    #[rstest]
    fn test_partial_with_placeholder() {
        let cube = power().partial(args![__, 3]);
        assert_eq!(cube.call1(3), Ok(Value::from(27)));
    }

    #[rstest]
    fn test_pipe_and_compose() {
        let increment = add().at(1);
        assert_eq!(4 | (&increment >> power()), Ok(Value::from(25)));
        assert_eq!((power() << &increment).call1(4), Ok(Value::from(25)));
    }

    #[rstest]
    fn test_lifted_function_in_value() {
        let value = Value::from(add());
        assert_eq!(value.call(args![2, 3]), Ok(Value::from(5)));
    }
}
