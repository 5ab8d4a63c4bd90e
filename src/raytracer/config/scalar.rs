use std::num::FpCategory;

use nalgebra::Vector3;
use thiserror::Error;

/// A token that is not, in its entirety, a number of the requested type.
#[derive(Debug, Error, PartialEq)]
#[error("invalid numeric token: {0:?}")]
pub struct InvalidNumber(pub String);

/// Parses a base-10 integer, optionally signed. The whole token must be consumed.
pub fn parse_int_strict(token: &str) -> Result<i32, InvalidNumber> {
    token
        .parse::<i32>()
        .map_err(|_| InvalidNumber(token.to_string()))
}

/// Parses a floating-point literal (sign, decimal point and exponent allowed).
/// The whole token must be consumed, and the value must be representable:
/// literals that overflow to infinity or underflow to zero or a subnormal
/// are rejected.
pub fn parse_float_strict(token: &str) -> Result<f64, InvalidNumber> {
    let invalid = || InvalidNumber(token.to_string());
    let value = token.parse::<f64>().map_err(|_| invalid())?;
    match value.classify() {
        FpCategory::Infinite if !is_infinity_literal(token) => Err(invalid()),
        FpCategory::Zero if has_nonzero_mantissa(token) => Err(invalid()),
        FpCategory::Subnormal => Err(invalid()),
        _ => Ok(value),
    }
}

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn has_nonzero_mantissa(token: &str) -> bool {
    token
        .split(['e', 'E'])
        .next()
        .unwrap_or_default()
        .bytes()
        .any(|b| matches!(b, b'1'..=b'9'))
}

/// Parses a strictly positive integer.
pub fn parse_positive_int(token: &str) -> Result<u32, InvalidNumber> {
    let value = parse_int_strict(token)?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| InvalidNumber(token.to_string()))
}

/// Parses exactly three floats into a vector.
pub fn parse_vector(tokens: &[&str]) -> Result<Vector3<f64>, InvalidNumber> {
    match tokens {
        [x, y, z] => Ok(Vector3::new(
            parse_float_strict(x)?,
            parse_float_strict(y)?,
            parse_float_strict(z)?,
        )),
        _ => Err(InvalidNumber(tokens.join(" "))),
    }
}

/// True when every component lies in [0, 1]. NaN components are rejected.
pub fn is_unit_color(color: &Vector3<f64>) -> bool {
    color.iter().all(|c| (0.0..=1.0).contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12", 12)]
    #[case("-5", -5)]
    #[case("+7", 7)]
    #[case("0", 0)]
    fn test_parse_int_strict_accepts(#[case] token: &str, #[case] expected: i32) {
        assert_eq!(parse_int_strict(token), Ok(expected));
    }

    #[rstest]
    #[case("12abc")]
    #[case("12.0")]
    #[case("1e3")]
    #[case("")]
    #[case("12 ")]
    #[case("99999999999")]
    fn test_parse_int_strict_rejects(#[case] token: &str) {
        assert_eq!(
            parse_int_strict(token),
            Err(InvalidNumber(token.to_string()))
        );
    }

    #[rstest]
    #[case("12.0", 12.0)]
    #[case("12", 12.0)]
    #[case("-0.5", -0.5)]
    #[case("+1.5e2", 150.0)]
    #[case(".25", 0.25)]
    fn test_parse_float_strict_accepts(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(parse_float_strict(token), Ok(expected));
    }

    #[rstest]
    #[case("inf", f64::INFINITY)]
    #[case("-Infinity", f64::NEG_INFINITY)]
    #[case("0e999", 0.0)]
    #[case("-0.0", -0.0)]
    #[case("1e308", 1e308)]
    fn test_parse_float_strict_special_values(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(parse_float_strict(token), Ok(expected));
    }

    #[rstest]
    #[case("1e999")]
    #[case("-1e999")]
    #[case("1e-400")]
    #[case("-1e-400")]
    #[case("1e-310")]
    #[case("0.5e-400")]
    fn test_parse_float_strict_rejects_out_of_range(#[case] token: &str) {
        assert_eq!(
            parse_float_strict(token),
            Err(InvalidNumber(token.to_string()))
        );
    }

    #[rstest]
    #[case("1.5x")]
    #[case("1.2.3")]
    #[case("abc")]
    #[case("")]
    fn test_parse_float_strict_rejects(#[case] token: &str) {
        assert!(parse_float_strict(token).is_err());
    }

    #[test]
    fn test_parse_positive_int() {
        assert_eq!(parse_positive_int("100"), Ok(100));
        assert!(parse_positive_int("0").is_err());
        assert!(parse_positive_int("-5").is_err());
        assert!(parse_positive_int("5.0").is_err());
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(
            parse_vector(&["1", "-2.5", "3e1"]),
            Ok(Vector3::new(1.0, -2.5, 30.0))
        );
        assert!(parse_vector(&["1", "2"]).is_err());
        assert!(parse_vector(&["1", "2", "z"]).is_err());
    }

    #[rstest]
    #[case(0.0, 0.5, 1.0, true)]
    #[case(-0.0001, 0.5, 1.0, false)]
    #[case(0.0, 1.0001, 1.0, false)]
    #[case(0.0, 0.5, f64::NAN, false)]
    fn test_is_unit_color(#[case] r: f64, #[case] g: f64, #[case] b: f64, #[case] ok: bool) {
        assert_eq!(is_unit_color(&Vector3::new(r, g, b)), ok);
    }
}
