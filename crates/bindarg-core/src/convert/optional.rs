use super::Converter;
use crate::TERMINATOR;
use crate::error::ConversionResult;
use crate::value::Value;

/// `--` consumes itself and yields absence; anything else is handed, in
/// full, to the inner converter and wrapped as present.
pub(super) fn convert<'a>(
    inner: &Converter,
    tokens: &'a [String],
) -> ConversionResult<(Value, &'a [String])> {
    if let Some((first, rest)) = tokens.split_first()
        && first == TERMINATOR
    {
        return Ok((Value::Optional(None), rest));
    }
    let (value, rest) = inner.convert(tokens)?;
    Ok((Value::Optional(Some(Box::new(value))), rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::target::IntWidth;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_present_value() {
        let input = tokens(&["123"]);
        let (value, rest) = convert(&Converter::Int(IntWidth::Default), &input).unwrap();
        assert_eq!(value, Value::Optional(Some(Box::new(Value::Isize(123)))));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_terminator_is_absent() {
        let input = tokens(&["--"]);
        let (value, rest) = convert(&Converter::Int(IntWidth::Default), &input).unwrap();
        assert!(value.is_absent());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_terminator_only_consumes_itself() {
        let input = tokens(&["--", "5"]);
        let (_, rest) = convert(&Converter::String, &input).unwrap();
        assert_eq!(rest, &input[1..]);
    }

    #[test]
    fn test_inner_failure_propagates() {
        let input = tokens(&["nope"]);
        let err = convert(&Converter::Bool, &input).unwrap_err();
        assert_eq!(err, ConversionError::InvalidBool("nope".into()));
    }

    #[test]
    fn test_nested_optional() {
        let inner = Converter::Optional(Box::new(Converter::String));
        let input = tokens(&["x"]);
        let (value, _) = convert(&inner, &input).unwrap();
        assert_eq!(
            value,
            Value::Optional(Some(Box::new(Value::Optional(Some(Box::new(
                Value::String("x".into())
            ))))))
        );
    }
}
