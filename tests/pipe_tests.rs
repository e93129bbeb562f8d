//! Unit tests for the pipe operator.
//!
//! Tests for feeding values into wrapped callables with `value | f`.

use rstest::rstest;
use sidekick::{CallError, Func, Value, func};

fn length() -> Func {
    func(|arguments: sidekick::Arguments| -> Result<Value, CallError> {
        let text: String = arguments.get_as(0)?;
        Ok(Value::from(i64::try_from(text.chars().count()).unwrap_or(i64::MAX)))
    })
}

fn describe() -> Func {
    Func::from_fn(|arguments| Ok(Value::from(arguments.positional()[0].type_name())))
}

// =============================================================================
// Source types
// =============================================================================

#[rstest]
#[case(Value::None, "none")]
#[case(Value::from(true), "bool")]
#[case(Value::from(1), "int")]
#[case(Value::from(1.5), "float")]
#[case(Value::from("text"), "str")]
#[case(Value::from(vec![1, 2]), "list")]
fn test_pipe_value(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value | describe(), Ok(Value::from(expected)));
}

#[rstest]
fn test_pipe_native_scalars() {
    let function = describe();
    assert_eq!(true | &function, Ok(Value::from("bool")));
    assert_eq!(7 | &function, Ok(Value::from("int")));
    assert_eq!(0.5 | &function, Ok(Value::from("float")));
}

#[rstest]
fn test_pipe_strings() {
    assert_eq!("hello" | length(), Ok(Value::from(5)));
    assert_eq!(String::from("héllo") | &length(), Ok(Value::from(5)));
}

// =============================================================================
// Pipelines
// =============================================================================

#[rstest]
fn test_pipe_into_composition() {
    let double = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? * 2)));
    assert_eq!("four" | (length() >> double), Ok(Value::from(8)));
}

#[rstest]
fn test_pipe_chain_with_and_then() {
    let increment = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? + 1)));
    let result = ("abc" | length())
        .and_then(|value| value | &increment)
        .and_then(|value| value | &increment);
    assert_eq!(result, Ok(Value::from(5)));
}

#[rstest]
fn test_pipe_propagates_errors() {
    assert_eq!(
        42 | length(),
        Err(CallError::TypeMismatch {
            expected: "str",
            found: "int"
        })
    );
}

#[rstest]
fn test_pipe_unsuffixed_literal_result_is_usable() {
    let double = Func::from_fn(|arguments| Ok(Value::from(arguments.get_as::<i64>(0)? * 2)));
    let result = (21 | &double).unwrap();
    assert_eq!(result, Value::from(42));
    assert!((4 | double).is_ok_and(|value| value == Value::from(8)));
}

#[rstest]
fn test_pipe_into_returned_function() {
    let adder = Func::from_fn(|arguments| {
        let amount = arguments.get_as::<i64>(0)?;
        Ok(Value::from(Func::from_fn(move |inner| {
            Ok(Value::from(inner.get_as::<i64>(0)? + amount))
        })))
    });
    let add_ten = (10 | adder).map(|value| value.as_func().cloned());
    let Ok(Some(add_ten)) = add_ten else {
        panic!("expected a function");
    };
    assert_eq!(5 | add_ten, Ok(Value::from(15)));
}
