//! End-to-end runs against single commands and command tables.

use std::cell::Cell;
use std::rc::Rc;

use bindarg::core::{ConversionError, SignatureError};
use bindarg::framework::{DispatchError, Stage};
use bindarg::prelude::*;

// ============================================================================
// Positional parameters
// ============================================================================

#[test]
fn test_run_simple() {
    let seen = Rc::new(Cell::new(None));
    let cmd = Command::new({
        let seen = Rc::clone(&seen);
        move |n: isize| seen.set(Some(n))
    });

    for (token, expected) in [("123", 123), ("0", 0), ("-1", -1)] {
        run(&cmd, [token]).unwrap();
        assert_eq!(seen.get(), Some(expected));
    }
}

#[test]
fn test_run_too_many() {
    let cmd = Command::new(|_: isize| {});
    let err = run(&cmd, ["123", "456"]).unwrap_err();
    assert_eq!(err.to_string(), "too many arguments");
    assert!(matches!(
        err,
        RunError::Conversion(ConversionError::TooManyArguments)
    ));
}

#[test]
fn test_run_too_few() {
    let cmd = Command::new(|_: isize| {});
    let err = run(&cmd, Vec::<String>::new()).unwrap_err();
    assert_eq!(err.to_string(), "too few arguments");
    assert_eq!(err.stage(), Stage::Conversion);
}

#[test]
fn test_run_optional() {
    let seen = Rc::new(Cell::new(Some(-7)));
    let cmd = Command::new({
        let seen = Rc::clone(&seen);
        move |v: Option<isize>| seen.set(v)
    });

    run(&cmd, ["123"]).unwrap();
    assert_eq!(seen.get(), Some(123));

    run(&cmd, ["--"]).unwrap();
    assert_eq!(seen.get(), None);
}

#[test]
fn test_mixed_scalars() {
    let cmd = Command::new(|a: bool, b: u16, c: f32, d: String, e: i8| {
        (a, b, format!("{c}:{d}"), e)
    });
    let results = run(&cmd, ["T", "0x1F", "2.5", "x", "-0b11"]).unwrap();
    assert_eq!(
        results,
        vec![
            Value::Bool(true),
            Value::U16(31),
            Value::String("2.5:x".into()),
            Value::I8(-3),
        ]
    );
}

#[test]
fn test_conversion_errors_name_the_token() {
    let cmd = Command::new(|_: u8| {});
    assert_eq!(
        run(&cmd, ["256"]).unwrap_err().to_string(),
        "invalid integer: 256"
    );
    assert_eq!(
        run(&cmd, ["-1"]).unwrap_err().to_string(),
        "invalid integer: -1"
    );

    let cmd = Command::new(|_: f32| {});
    assert_eq!(
        run(&cmd, ["1e39"]).unwrap_err().to_string(),
        "invalid float: 1e39"
    );
}

#[test]
fn test_canonical_text_round_trips() {
    let ints = Command::new(|n: i64| n);
    for text in ["0", "-1", "42", "9223372036854775807", "-9223372036854775808"] {
        let results = run(&ints, [text]).unwrap();
        assert_eq!(results[0].to_string(), text);
    }

    let floats = Command::new(|x: f64| x);
    for text in ["0", "-1.5", "3.141592653589793", "1e300"] {
        let results = run(&floats, [text]).unwrap();
        let back: f64 = results[0].to_string().parse().unwrap();
        assert_eq!(back, text.parse::<f64>().unwrap());
    }
}

// ============================================================================
// Variadic tail
// ============================================================================

#[test]
fn test_variadic_collects_overflow() {
    let cmd = Command::new(|op: String, values: Rest<i64>| -> Result<i64, String> {
        match op.as_str() {
            "sum" => Ok(values.iter().sum()),
            "max" => values.iter().copied().max().ok_or_else(|| "empty".to_string()),
            other => Err(format!("unknown op: {other}")),
        }
    });

    assert_eq!(run(&cmd, ["sum", "1", "2", "3"]).unwrap(), vec![Value::I64(6)]);
    assert_eq!(run(&cmd, ["max", "4"]).unwrap(), vec![Value::I64(4)]);

    let err = run(&cmd, ["sum"]).unwrap_err();
    assert!(matches!(
        err,
        RunError::Conversion(ConversionError::TooFewArguments)
    ));

    let err = run(&cmd, ["avg", "1"]).unwrap_err();
    assert_eq!(err.stage(), Stage::Invocation);
    assert_eq!(err.to_string(), "unknown op: avg");
}

#[test]
fn test_variadic_optionals() {
    let cmd = Command::new(|values: Rest<Option<u8>>| {
        values.iter().filter(|v| v.is_none()).count()
    });
    assert_eq!(
        run(&cmd, ["1", "--", "2", "--", "--"]).unwrap(),
        vec![Value::Usize(3)]
    );
}

#[test]
fn test_misplaced_rest_is_a_signature_error() {
    let cmd = Command::new(|_: Rest<u8>, _: u8| {});
    let err = run(&cmd, ["1", "2"]).unwrap_err();
    assert!(matches!(
        err,
        RunError::Signature(SignatureError::VariadicNotLast { index: 0 })
    ));
}

#[test]
fn test_unsupported_type_fails_before_conversion() {
    let cmd = Command::new(|_: Vec<u8>| {});
    let err = run(&cmd, ["not", "even", "read"]).unwrap_err();
    assert_eq!(err.stage(), Stage::Signature);
    assert!(err.to_string().starts_with("unsupported type"));
}

// ============================================================================
// Results and errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
struct DivByZero;

#[test]
fn test_error_slot_is_split_off() {
    let cmd = Command::new(|a: i32, b: i32| {
        if b == 0 { Err(DivByZero) } else { Ok((a / b, a % b)) }
    });

    assert_eq!(
        run(&cmd, ["7", "2"]).unwrap(),
        vec![Value::I32(3), Value::I32(1)]
    );

    let err = run(&cmd, ["7", "0"]).unwrap_err();
    assert_eq!(err.to_string(), "division by zero");
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.downcast_ref::<DivByZero>().is_some());
}

#[test]
fn test_plain_results_never_error() {
    let cmd = Command::new(|s: String| (s.len(), s));
    assert_eq!(
        run(&cmd, ["abc"]).unwrap(),
        vec![Value::Usize(3), Value::String("abc".into())]
    );
}

// ============================================================================
// Command tables
// ============================================================================

fn app() -> Commands {
    Commands::new()
        .command("neg", |n: i64| -n)
        .command("echo", |words: Rest<String>| words.join(" "))
        .nest(
            "math",
            Commands::new()
                .command("add", |a: f64, b: f64| a + b)
                .command("not", |b: bool| !b),
        )
}

#[test]
fn test_dispatch() {
    let app = app();
    assert_eq!(run(&app, ["neg", "5"]).unwrap(), vec![Value::I64(-5)]);
    assert_eq!(
        run(&app, ["echo", "a", "b"]).unwrap(),
        vec![Value::String("a b".into())]
    );
    assert_eq!(
        run(&app, ["math", "not", "F"]).unwrap(),
        vec![Value::Bool(true)]
    );
}

#[test]
fn test_dispatch_errors() {
    let app = app();

    let err = run(&app, Vec::<&str>::new()).unwrap_err();
    assert!(matches!(err, RunError::Dispatch(DispatchError::NoSubCommand)));

    let err = run(&app, ["math"]).unwrap_err();
    assert_eq!(err.to_string(), "no sub-command");

    let err = run(&app, ["math", "mul", "2", "3"]).unwrap_err();
    assert_eq!(err.to_string(), "unknown sub-command: mul");
}

#[test]
fn test_target_enum() {
    let targets: Vec<Target> = vec![Command::new(|n: u8| n).into(), app().into()];
    assert_eq!(run(&targets[0], ["9"]).unwrap(), vec![Value::U8(9)]);
    assert_eq!(run(&targets[1], ["neg", "9"]).unwrap(), vec![Value::I64(-9)]);
}
