use rust_decimal::Decimal;
use std::str::FromStr;

/// Loose numeric coercion for billing form fields.
///
/// Policy: blank or unparsable input is ZERO, by design — a half-filled item
/// row contributes nothing to the subtotal instead of failing the whole
/// form. Negative values parse normally here and are rejected by the value
/// objects, so a typed minus sign still surfaces as a validation error
/// rather than being swallowed.
pub fn parse_amount_or_zero(input: &str) -> Decimal {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Decimal::ZERO;
  }
  Decimal::from_str(trimmed).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_parses_plain_numbers() {
    assert_eq!(parse_amount_or_zero("499.50"), dec!(499.50));
    assert_eq!(parse_amount_or_zero(" 12 "), dec!(12));
  }

  #[test]
  fn test_blank_and_garbage_default_to_zero() {
    assert_eq!(parse_amount_or_zero(""), dec!(0));
    assert_eq!(parse_amount_or_zero("   "), dec!(0));
    assert_eq!(parse_amount_or_zero("abc"), dec!(0));
    assert_eq!(parse_amount_or_zero("12,500"), dec!(0));
  }

  #[test]
  fn test_negative_values_survive_for_later_rejection() {
    assert_eq!(parse_amount_or_zero("-5"), dec!(-5));
  }
}
