//! Tests for sharing wrappers across threads.
//!
//! Wrappers are immutable once built, so the same `Func` (and every partial
//! application or curried step derived from it) can be called from many
//! threads at once.

use std::sync::Arc;
use std::thread;

use rstest::rstest;
use sidekick::{Func, NativeFunction, Signature, Value, args, curry};

fn multiply() -> NativeFunction {
    NativeFunction::with_parameters(
        "multiply",
        Signature::positional(["x", "y"]),
        |bound| Ok(Value::from(bound.get_as::<i64>(0)? * bound.get_as::<i64>(1)?)),
    )
}

#[rstest]
fn test_func_called_from_many_threads() {
    let double = Func::new(multiply()).at(2);
    let handles: Vec<_> = (0..8_i64)
        .map(|index| {
            let double = double.clone();
            thread::spawn(move || double.call1(index))
        })
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let expected = i64::try_from(index).unwrap() * 2;
        assert_eq!(handle.join().unwrap(), Ok(Value::from(expected)));
    }
}

#[rstest]
fn test_curried_steps_shared_across_threads() {
    let curried = Arc::new(curry(multiply()).unwrap());
    let handles: Vec<_> = (1..=4_i64)
        .map(|factor| {
            let curried = Arc::clone(&curried);
            thread::spawn(move || {
                let step = sidekick::Callable::call(&*curried, args![factor])?;
                step.call1(10)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(
        results,
        vec![
            Ok(Value::from(10)),
            Ok(Value::from(20)),
            Ok(Value::from(30)),
            Ok(Value::from(40)),
        ]
    );
}

#[rstest]
fn test_placeholder_partial_shared_across_threads() {
    let halve = Func::new(NativeFunction::with_parameters(
        "divide",
        Signature::positional(["numerator", "denominator"]),
        |bound| Ok(Value::from(bound.get_as::<f64>(0)? / bound.get_as::<f64>(1)?)),
    ))
    .partial(args![__, 2.0]);

    thread::scope(|scope| {
        for value in [2.0, 4.0, 9.0] {
            let halve = &halve;
            scope.spawn(move || {
                assert_eq!(halve.call1(value), Ok(Value::from(value / 2.0)));
            });
        }
    });
}
