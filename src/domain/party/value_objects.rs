use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
  // 15-character GSTIN: state code, PAN, entity number, default 'Z', check char
  static ref GSTIN_RE: Regex = Regex::new(r"^\d{2}[A-Z]{5}\d{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").unwrap();
  static ref MOBILE_RE: Regex = Regex::new(r"^[6-9]\d{9}$").unwrap();
  static ref PINCODE_RE: Regex = Regex::new(r"^[1-9]\d{5}$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid party name: {0}")]
  InvalidPartyName(String),
  #[error("Invalid GSTIN: {0}")]
  InvalidGstin(String),
  #[error("Invalid mobile number: {0}")]
  InvalidMobileNumber(String),
  #[error("Invalid email: {0}")]
  InvalidEmail(String),
  #[error("Invalid pincode: {0}")]
  InvalidPincode(String),
  #[error("Invalid state: {0}")]
  InvalidState(String),
}

// Party Name - the legal/company name printed on invoices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyName(String);

impl PartyName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidPartyName(
        "Party name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidPartyName(
        "Party name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PartyName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// GSTIN - 15-character GST identification number.
// Format-checked only; never verified against the live GST registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gstin(String);

impl Gstin {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let normalized = value.trim().to_uppercase();
    if !GSTIN_RE.is_match(&normalized) {
      return Err(ValueObjectError::InvalidGstin(format!(
        "'{}' is not a valid 15-character GSTIN",
        value.trim()
      )));
    }
    Ok(Self(normalized))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  /// The two-digit state code prefix of the GSTIN.
  pub fn state_code(&self) -> &str {
    &self.0[..2]
  }
}

impl fmt::Display for Gstin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Mobile Number - 10-digit Indian mobile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileNumber(String);

impl MobileNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !MOBILE_RE.is_match(&trimmed) {
      return Err(ValueObjectError::InvalidMobileNumber(format!(
        "'{}' is not a valid 10-digit mobile number",
        value.trim()
      )));
    }
    Ok(Self(trimmed))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Email - lightweight shape check, full verification is not this service's job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim().to_lowercase();
    let valid = trimmed.len() <= 255
      && trimmed.split('@').count() == 2
      && trimmed.split('@').all(|part| !part.is_empty())
      && trimmed.rsplit('@').next().is_some_and(|d| d.contains('.'));
    if !valid {
      return Err(ValueObjectError::InvalidEmail(format!(
        "'{}' is not a valid email address",
        value.trim()
      )));
    }
    Ok(Self(trimmed))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// State name - used for the interstate/intrastate tax decision, so it must
// compare reliably regardless of input casing and spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateName(String);

impl StateName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidState(
        "State cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidState(
        "State cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  /// Case- and whitespace-insensitive comparison for tax jurisdiction.
  pub fn matches(&self, other: &str) -> bool {
    self.0.trim().eq_ignore_ascii_case(other.trim())
  }
}

impl fmt::Display for StateName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Pincode - 6-digit Indian postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pincode(String);

impl Pincode {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if !PINCODE_RE.is_match(trimmed) {
      return Err(ValueObjectError::InvalidPincode(format!(
        "'{}' is not a valid 6-digit pincode",
        trimmed
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Party Address - all components optional except city/state which billing needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyAddress {
  pub plot_house_no: Option<String>,
  pub line1: Option<String>,
  pub area: Option<String>,
  pub landmark: Option<String>,
  pub city: Option<String>,
  pub state: StateName,
  pub pincode: Option<Pincode>,
}

impl PartyAddress {
  pub fn new(
    plot_house_no: Option<String>,
    line1: Option<String>,
    area: Option<String>,
    landmark: Option<String>,
    city: Option<String>,
    state: StateName,
    pincode: Option<Pincode>,
  ) -> Self {
    Self {
      plot_house_no,
      line1,
      area,
      landmark,
      city,
      state,
      pincode,
    }
  }

  pub fn format_multiline(&self) -> String {
    let mut lines = Vec::new();
    let mut first_line = Vec::new();
    for part in [&self.plot_house_no, &self.line1] {
      if let Some(part) = part {
        if !part.trim().is_empty() {
          first_line.push(part.trim().to_string());
        }
      }
    }
    if !first_line.is_empty() {
      lines.push(first_line.join(", "));
    }
    for part in [&self.area, &self.landmark] {
      if let Some(part) = part {
        if !part.trim().is_empty() {
          lines.push(part.trim().to_string());
        }
      }
    }
    let mut city_line = Vec::new();
    if let Some(city) = &self.city {
      if !city.trim().is_empty() {
        city_line.push(city.trim().to_string());
      }
    }
    city_line.push(self.state.value().to_string());
    if let Some(pincode) = &self.pincode {
      city_line.push(pincode.value().to_string());
    }
    lines.push(city_line.join(", "));
    lines.join("\n")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_party_name() {
    assert!(PartyName::new("Sharma Textiles".to_string()).is_ok());
    assert!(PartyName::new("   ".to_string()).is_err());
    assert_eq!(
      PartyName::new("  Sharma Textiles  ".to_string())
        .unwrap()
        .value(),
      "Sharma Textiles"
    );
  }

  #[test]
  fn test_gstin_format() {
    let gstin = Gstin::new("24AAACB1234C1Z5".to_string()).unwrap();
    assert_eq!(gstin.value(), "24AAACB1234C1Z5");
    assert_eq!(gstin.state_code(), "24");

    // lowercase input is normalized
    assert!(Gstin::new("24aaacb1234c1z5".to_string()).is_ok());

    assert!(Gstin::new("".to_string()).is_err());
    assert!(Gstin::new("24AAACB1234C1X5".to_string()).is_err()); // missing 'Z'
    assert!(Gstin::new("24AAACB1234C1Z".to_string()).is_err()); // too short
    assert!(Gstin::new("XXAAACB1234C1Z5".to_string()).is_err()); // bad state code
  }

  #[test]
  fn test_mobile_number() {
    assert!(MobileNumber::new("9876543210".to_string()).is_ok());
    assert!(MobileNumber::new("98765 43210".to_string()).is_ok());
    assert!(MobileNumber::new("1234567890".to_string()).is_err()); // bad leading digit
    assert!(MobileNumber::new("98765".to_string()).is_err());
  }

  #[test]
  fn test_email() {
    assert!(Email::new("billing@sharma.co.in".to_string()).is_ok());
    assert!(Email::new("no-at-sign".to_string()).is_err());
    assert!(Email::new("user@nodot".to_string()).is_err());
    assert_eq!(
      Email::new("Billing@Sharma.IN".to_string()).unwrap().value(),
      "billing@sharma.in"
    );
  }

  #[test]
  fn test_state_matches_ignores_case_and_spacing() {
    let state = StateName::new("Gujarat".to_string()).unwrap();
    assert!(state.matches("gujarat"));
    assert!(state.matches("  GUJARAT "));
    assert!(!state.matches("Maharashtra"));
  }

  #[test]
  fn test_pincode() {
    assert!(Pincode::new("395006".to_string()).is_ok());
    assert!(Pincode::new("039500".to_string()).is_err()); // leading zero
    assert!(Pincode::new("9500".to_string()).is_err());
  }

  #[test]
  fn test_address_multiline() {
    let address = PartyAddress::new(
      Some("12-B".to_string()),
      Some("Ring Road".to_string()),
      Some("Udhna".to_string()),
      None,
      Some("Surat".to_string()),
      StateName::new("Gujarat".to_string()).unwrap(),
      Some(Pincode::new("395006".to_string()).unwrap()),
    );
    let formatted = address.format_multiline();
    assert!(formatted.contains("12-B, Ring Road"));
    assert!(formatted.contains("Surat, Gujarat, 395006"));
  }
}
