use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
  static ref HSN_RE: Regex = Regex::new(r"^\d{4,8}$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid item name: {0}")]
  InvalidItemName(String),
  #[error("Invalid HSN code: {0}")]
  InvalidHsnCode(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid unit price: {0}")]
  InvalidUnitPrice(String),
  #[error("Invalid GST rate: {0}")]
  InvalidGstRate(String),
  #[error("Invalid discount: {0}")]
  InvalidDiscount(String),
  #[error("Invalid percentage: {0}")]
  InvalidPercent(String),
  #[error("Invalid bill status: {0}")]
  InvalidStatus(String),
  #[error("Invalid payment method: {0}")]
  InvalidPaymentMethod(String),
  #[error("Invalid document type: {0}")]
  InvalidDocumentType(String),
}

// Item Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemName(String);

impl ItemName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// HSN Code - 4 to 8 digit goods classification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsnCode(String);

impl HsnCode {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if !HSN_RE.is_match(trimmed) {
      return Err(ValueObjectError::InvalidHsnCode(format!(
        "'{}' is not a valid 4-8 digit HSN code",
        trimmed
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Quantity. Zero is permitted: blank or unparsable form input coerces to
// zero (see parse module) and the line then contributes nothing to the
// subtotal. Negative quantities are rejected here, before any arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot be negative".to_string(),
      ));
    }
    if value.scale() > 3 {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot have more than 3 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Unit Price - non-negative rupee amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price cannot be negative".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// GST Rate - total rate percentage, split CGST/SGST or applied whole as IGST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstRate(Decimal);

impl GstRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
      return Err(ValueObjectError::InvalidGstRate(
        "GST rate must be between 0 and 100".to_string(),
      ));
    }
    if value.scale() > 2 {
      return Err(ValueObjectError::InvalidGstRate(
        "GST rate cannot have more than 2 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }
}

// Discount Percent - [0, 100], blank form input defaults to 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
      return Err(ValueObjectError::InvalidDiscount(
        "Discount must be between 0 and 100 percent".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Percent - generic [0, 100] rate for payment settlement (TDS, other
// claims, brokerage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percent(Decimal);

impl Percent {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
      return Err(ValueObjectError::InvalidPercent(
        "Percentage must be between 0 and 100".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  /// The fraction of `base` this percentage represents.
  pub fn of(&self, base: Decimal) -> Decimal {
    base * self.0 / Decimal::from(100)
  }
}

// Bill Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
  Pending,
  Paid,
  Cancelled,
}

impl BillStatus {
  pub fn can_transition_to(&self, new_status: BillStatus) -> bool {
    match (self, new_status) {
      // Recording a payment settles the bill
      (BillStatus::Pending, BillStatus::Paid) => true,
      // Removing a recorded payment reopens it
      (BillStatus::Paid, BillStatus::Pending) => true,
      // Manual cancellation of an unpaid bill
      (BillStatus::Pending, BillStatus::Cancelled) => true,
      // Cancelled is terminal
      _ => false,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      BillStatus::Pending => "pending",
      BillStatus::Paid => "paid",
      BillStatus::Cancelled => "cancelled",
    }
  }
}

impl FromStr for BillStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pending" => Ok(BillStatus::Pending),
      "paid" => Ok(BillStatus::Paid),
      "cancelled" => Ok(BillStatus::Cancelled),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for BillStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Payment Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  Cash,
  Cheque,
  Upi,
  NetBanking,
}

impl PaymentMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentMethod::Cash => "cash",
      PaymentMethod::Cheque => "cheque",
      PaymentMethod::Upi => "upi",
      PaymentMethod::NetBanking => "netbanking",
    }
  }
}

impl FromStr for PaymentMethod {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "cash" => Ok(PaymentMethod::Cash),
      "cheque" => Ok(PaymentMethod::Cheque),
      "upi" => Ok(PaymentMethod::Upi),
      "netbanking" => Ok(PaymentMethod::NetBanking),
      _ => Err(ValueObjectError::InvalidPaymentMethod(format!(
        "Unknown payment method: {}",
        s
      ))),
    }
  }
}

// Document Type - the two independently numbered document sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
  Bill,
  Challan,
}

impl DocumentType {
  pub fn as_str(&self) -> &'static str {
    match self {
      DocumentType::Bill => "bill",
      DocumentType::Challan => "challan",
    }
  }
}

impl FromStr for DocumentType {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "bill" => Ok(DocumentType::Bill),
      "challan" => Ok(DocumentType::Challan),
      _ => Err(ValueObjectError::InvalidDocumentType(format!(
        "Unknown document type: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for DocumentType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Tax Jurisdiction - the interstate/intrastate decision. This is a hard
// design rule, not a UI default: IGST across state lines, CGST+SGST within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxJurisdiction {
  IntraState,
  InterState,
}

impl TaxJurisdiction {
  pub fn from_states(party_state: &str, issuer_state: &str) -> Self {
    if party_state.trim().eq_ignore_ascii_case(issuer_state.trim()) {
      TaxJurisdiction::IntraState
    } else {
      TaxJurisdiction::InterState
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_hsn_code() {
    assert!(HsnCode::new("5208".to_string()).is_ok());
    assert!(HsnCode::new("52081190".to_string()).is_ok());
    assert!(HsnCode::new("520".to_string()).is_err());
    assert!(HsnCode::new("520811901".to_string()).is_err());
    assert!(HsnCode::new("52AB".to_string()).is_err());
  }

  #[test]
  fn test_quantity() {
    assert!(Quantity::new(dec!(2)).is_ok());
    assert!(Quantity::new(dec!(0)).is_ok()); // blank input coerces to zero
    assert!(Quantity::new(dec!(-1)).is_err());
    assert!(Quantity::new(dec!(1.2345)).is_err());
  }

  #[test]
  fn test_unit_price() {
    assert!(UnitPrice::new(dec!(0)).is_ok());
    assert!(UnitPrice::new(dec!(499.50)).is_ok());
    assert!(UnitPrice::new(dec!(-1)).is_err());
  }

  #[test]
  fn test_gst_rate_bounds() {
    assert!(GstRate::new(dec!(0)).is_ok());
    assert!(GstRate::new(dec!(18)).is_ok());
    assert!(GstRate::new(dec!(100)).is_ok());
    assert!(GstRate::new(dec!(-1)).is_err());
    assert!(GstRate::new(dec!(101)).is_err());
  }

  #[test]
  fn test_discount_bounds() {
    assert!(DiscountPercent::new(dec!(0)).is_ok());
    assert!(DiscountPercent::new(dec!(100)).is_ok());
    assert!(DiscountPercent::new(dec!(100.01)).is_err());
    assert!(DiscountPercent::new(dec!(-0.01)).is_err());
  }

  #[test]
  fn test_percent_of() {
    let percent = Percent::new(dec!(2)).unwrap();
    assert_eq!(percent.of(dec!(10000)), dec!(200));
    assert_eq!(Percent::zero().of(dec!(10000)), dec!(0));
  }

  #[test]
  fn test_bill_status_transitions() {
    assert!(BillStatus::Pending.can_transition_to(BillStatus::Paid));
    assert!(BillStatus::Pending.can_transition_to(BillStatus::Cancelled));
    assert!(BillStatus::Paid.can_transition_to(BillStatus::Pending));

    assert!(!BillStatus::Paid.can_transition_to(BillStatus::Cancelled));
    assert!(!BillStatus::Cancelled.can_transition_to(BillStatus::Pending));
    assert!(!BillStatus::Cancelled.can_transition_to(BillStatus::Paid));
  }

  #[test]
  fn test_status_round_trip() {
    for status in [BillStatus::Pending, BillStatus::Paid, BillStatus::Cancelled] {
      assert_eq!(BillStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(BillStatus::from_str("draft").is_err());
  }

  #[test]
  fn test_payment_method_round_trip() {
    for method in [
      PaymentMethod::Cash,
      PaymentMethod::Cheque,
      PaymentMethod::Upi,
      PaymentMethod::NetBanking,
    ] {
      assert_eq!(PaymentMethod::from_str(method.as_str()).unwrap(), method);
    }
    assert!(PaymentMethod::from_str("barter").is_err());
  }

  #[test]
  fn test_jurisdiction_from_states() {
    assert_eq!(
      TaxJurisdiction::from_states("Gujarat", "gujarat "),
      TaxJurisdiction::IntraState
    );
    assert_eq!(
      TaxJurisdiction::from_states("Maharashtra", "Gujarat"),
      TaxJurisdiction::InterState
    );
  }
}
