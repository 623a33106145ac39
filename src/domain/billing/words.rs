use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const ONES: [&str; 20] = [
  "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
  "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
  "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Renders a rupee amount as the words line printed on an invoice, using
/// Indian grouping (thousand, lakh, crore).
///
/// Paise policy: the amount is rounded to two decimal places and a nonzero
/// paise fraction is spelled out as an "and N Paise" clause; it is never
/// silently dropped. Bills word their rounded total, which is always a whole
/// number of rupees, so the clause only appears when callers word an
/// unrounded amount.
///
/// Examples: "Rupees Zero only", "Rupees One Lakh only",
/// "Rupees Ninety Nine and Fifty Paise only".
pub fn amount_in_words(amount: Decimal) -> String {
  let amount = amount.abs().round_dp(2);
  let rupees = amount.trunc().to_u64().unwrap_or(0);
  let paise = ((amount - amount.trunc()) * Decimal::from(100))
    .round()
    .to_u64()
    .unwrap_or(0);

  let rupee_words = if rupees == 0 {
    "Zero".to_string()
  } else {
    integer_words(rupees)
  };

  if paise == 0 {
    format!("Rupees {} only", rupee_words)
  } else {
    format!("Rupees {} and {} Paise only", rupee_words, integer_words(paise))
  }
}

/// English words for a positive integer in Indian grouping. Amounts of a
/// hundred crore and above recurse on the crore count, so any u64 renders.
fn integer_words(n: u64) -> String {
  debug_assert!(n > 0);
  let mut parts: Vec<String> = Vec::new();
  let mut n = n;

  if n >= 10_000_000 {
    parts.push(format!("{} Crore", integer_words(n / 10_000_000)));
    n %= 10_000_000;
  }
  if n >= 100_000 {
    parts.push(format!("{} Lakh", integer_words(n / 100_000)));
    n %= 100_000;
  }
  if n >= 1_000 {
    parts.push(format!("{} Thousand", integer_words(n / 1_000)));
    n %= 1_000;
  }
  if n >= 100 {
    parts.push(format!("{} Hundred", integer_words(n / 100)));
    n %= 100;
  }
  if n >= 20 {
    let tens = TENS[(n / 10) as usize];
    if n % 10 == 0 {
      parts.push(tens.to_string());
    } else {
      parts.push(format!("{} {}", tens, ONES[(n % 10) as usize]));
    }
  } else if n > 0 {
    parts.push(ONES[n as usize].to_string());
  }

  parts.join(" ")
}
