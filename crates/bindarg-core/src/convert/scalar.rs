//! Single-token converters.

use crate::error::{ConversionError, ConversionResult};
use crate::target::{FloatWidth, IntWidth};
use crate::value::Value;

type Converted<'a> = ConversionResult<(Value, &'a [String])>;

const TRUE_LITERALS: [&str; 3] = ["1", "t", "true"];
const FALSE_LITERALS: [&str; 3] = ["0", "f", "false"];

fn next_token(tokens: &[String]) -> ConversionResult<(&String, &[String])> {
    tokens.split_first().ok_or(ConversionError::EndOfInput)
}

pub(super) fn convert_bool(tokens: &[String]) -> Converted<'_> {
    let (token, rest) = next_token(tokens)?;
    let value = parse_bool(token).ok_or_else(|| ConversionError::InvalidBool(token.clone()))?;
    Ok((Value::Bool(value), rest))
}

pub(super) fn convert_string(tokens: &[String]) -> Converted<'_> {
    let (token, rest) = next_token(tokens)?;
    Ok((Value::String(token.clone()), rest))
}

pub(super) fn convert_int(width: IntWidth, tokens: &[String]) -> Converted<'_> {
    let (token, rest) = next_token(tokens)?;
    let invalid = || ConversionError::InvalidInteger(token.clone());
    let n = parse_signed(token, width.bits()).ok_or_else(invalid)?;
    let value = match width {
        IntWidth::Default => Value::Isize(isize::try_from(n).map_err(|_| invalid())?),
        IntWidth::W8 => Value::I8(i8::try_from(n).map_err(|_| invalid())?),
        IntWidth::W16 => Value::I16(i16::try_from(n).map_err(|_| invalid())?),
        IntWidth::W32 => Value::I32(i32::try_from(n).map_err(|_| invalid())?),
        IntWidth::W64 => Value::I64(n),
    };
    Ok((value, rest))
}

pub(super) fn convert_uint(width: IntWidth, tokens: &[String]) -> Converted<'_> {
    let (token, rest) = next_token(tokens)?;
    let invalid = || ConversionError::InvalidInteger(token.clone());
    let n = parse_unsigned(token, width.bits()).ok_or_else(invalid)?;
    let value = match width {
        IntWidth::Default => Value::Usize(usize::try_from(n).map_err(|_| invalid())?),
        IntWidth::W8 => Value::U8(u8::try_from(n).map_err(|_| invalid())?),
        IntWidth::W16 => Value::U16(u16::try_from(n).map_err(|_| invalid())?),
        IntWidth::W32 => Value::U32(u32::try_from(n).map_err(|_| invalid())?),
        IntWidth::W64 => Value::U64(n),
    };
    Ok((value, rest))
}

pub(super) fn convert_float(width: FloatWidth, tokens: &[String]) -> Converted<'_> {
    let (token, rest) = next_token(tokens)?;
    let invalid = || ConversionError::InvalidFloat(token.clone());
    // A finite literal that overflows the width parses as infinity; reject it.
    let value = match width {
        FloatWidth::W32 => {
            let v: f32 = token.parse().map_err(|_| invalid())?;
            if v.is_infinite() && !is_infinity_literal(token) {
                return Err(invalid());
            }
            Value::F32(v)
        }
        FloatWidth::W64 => {
            let v: f64 = token.parse().map_err(|_| invalid())?;
            if v.is_infinite() && !is_infinity_literal(token) {
                return Err(invalid());
            }
            Value::F64(v)
        }
    };
    Ok((value, rest))
}

// =============================================================================
// Literal parsing
// =============================================================================

fn parse_bool(token: &str) -> Option<bool> {
    if TRUE_LITERALS.iter().any(|l| token.eq_ignore_ascii_case(l)) {
        Some(true)
    } else if FALSE_LITERALS.iter().any(|l| token.eq_ignore_ascii_case(l)) {
        Some(false)
    } else {
        None
    }
}

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn strip_prefix_ignore_case<'a>(literal: &'a str, prefix: &str) -> Option<&'a str> {
    literal
        .get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &literal[prefix.len()..])
}

/// Splits off the base prefix: `0x`, `0o`, `0b`, or a leading `0` for octal.
fn split_radix(literal: &str) -> (u32, &str, bool) {
    if let Some(digits) = strip_prefix_ignore_case(literal, "0x") {
        (16, digits, true)
    } else if let Some(digits) = strip_prefix_ignore_case(literal, "0o") {
        (8, digits, true)
    } else if let Some(digits) = strip_prefix_ignore_case(literal, "0b") {
        (2, digits, true)
    } else if literal.len() > 1 && literal.starts_with('0') {
        (8, &literal[1..], true)
    } else {
        (10, literal, false)
    }
}

/// Parses an unsigned magnitude. `_` may separate digits (or follow a base
/// prefix) but may not lead, trail, or repeat.
fn parse_magnitude(literal: &str) -> Option<u128> {
    let (radix, digits, prefixed) = split_radix(literal);
    let mut value: u128 = 0;
    let mut after_digit = prefixed;
    let mut seen_digit = false;

    for ch in digits.chars() {
        if ch == '_' {
            if !after_digit {
                return None;
            }
            after_digit = false;
            continue;
        }
        let digit = ch.to_digit(radix)?;
        value = value
            .checked_mul(u128::from(radix))?
            .checked_add(u128::from(digit))?;
        after_digit = true;
        seen_digit = true;
    }

    (seen_digit && after_digit).then_some(value)
}

fn parse_signed(token: &str, bits: u32) -> Option<i64> {
    let (negative, literal) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let magnitude = parse_magnitude(literal)?;
    let limit = 1u128 << (bits - 1);
    if negative {
        if magnitude > limit {
            return None;
        }
        i64::try_from(-i128::try_from(magnitude).ok()?).ok()
    } else {
        if magnitude >= limit {
            return None;
        }
        i64::try_from(magnitude).ok()
    }
}

fn parse_unsigned(token: &str, bits: u32) -> Option<u64> {
    if token.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = parse_magnitude(token)?;
    if magnitude > (1u128 << bits) - 1 {
        return None;
    }
    u64::try_from(magnitude).ok()
}
