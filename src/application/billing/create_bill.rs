use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  BillData, BillingError, BillingService, DiscountPercent, GstRate, HsnCode, ItemName, LineItem,
  NumberAssignment, PaymentMethod, Quantity, UnitPrice, parse::parse_amount_or_zero,
};

/// One item row as submitted by the billing form. Quantity and price arrive
/// as text; blank or unparsable values coerce to zero (the row then
/// contributes nothing), while negatives are rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemDto {
  pub name: String,
  pub hsn_code: Option<String>,
  pub quantity: String,
  pub unit_price: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBillCommand {
  pub owner_id: Uuid,
  /// Explicit bill number for manual entry; allocated from the counter
  /// when absent.
  pub bill_no: Option<i64>,
  pub bill_date: NaiveDate,
  pub party_id: Uuid,
  pub challan_no: Option<i64>,
  pub items: Vec<LineItemDto>,
  pub discount_percent: Option<String>,
  pub gst_rate: String,
  pub payment_method: String,
  pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateBillResponse {
  pub bill_id: Uuid,
  pub bill_no: i64,
  pub rounded_total: rust_decimal::Decimal,
  pub created_at: DateTime<Utc>,
}

pub struct CreateBillUseCase {
  billing_service: Arc<BillingService>,
}

impl CreateBillUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: CreateBillCommand,
  ) -> Result<CreateBillResponse, BillingError> {
    let data = BillData {
      number: number_assignment_from(command.bill_no),
      bill_date: command.bill_date,
      party_id: command.party_id,
      challan_no: command.challan_no,
      items: line_items_from(command.items)?,
      discount: discount_from(command.discount_percent.as_deref())?,
      gst_rate: GstRate::new(parse_amount_or_zero(&command.gst_rate))?,
      payment_method: command.payment_method.parse::<PaymentMethod>()?,
      notes: command.notes.filter(|n| !n.trim().is_empty()),
    };

    let bill = self
      .billing_service
      .create_bill(command.owner_id, data)
      .await?;

    Ok(CreateBillResponse {
      bill_id: bill.id,
      bill_no: bill.bill_no,
      rounded_total: bill.amounts.rounded_total,
      created_at: bill.created_at,
    })
  }
}

pub(crate) fn number_assignment_from(explicit: Option<i64>) -> NumberAssignment {
  match explicit {
    Some(number) => NumberAssignment::Explicit(number),
    None => NumberAssignment::Auto,
  }
}

pub(crate) fn line_items_from(items: Vec<LineItemDto>) -> Result<Vec<LineItem>, BillingError> {
  items
    .into_iter()
    .map(|item| {
      let name = ItemName::new(item.name)?;
      let hsn_code = item
        .hsn_code
        .filter(|h| !h.trim().is_empty())
        .map(HsnCode::new)
        .transpose()?;
      let quantity = Quantity::new(parse_amount_or_zero(&item.quantity))?;
      let unit_price = UnitPrice::new(parse_amount_or_zero(&item.unit_price))?;
      Ok(LineItem::new(name, hsn_code, quantity, unit_price))
    })
    .collect()
}

pub(crate) fn discount_from(input: Option<&str>) -> Result<DiscountPercent, BillingError> {
  match input {
    None => Ok(DiscountPercent::zero()),
    Some(raw) => Ok(DiscountPercent::new(parse_amount_or_zero(raw))?),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn dto(quantity: &str, unit_price: &str) -> LineItemDto {
    LineItemDto {
      name: "Cotton Fabric".to_string(),
      hsn_code: None,
      quantity: quantity.to_string(),
      unit_price: unit_price.to_string(),
    }
  }

  #[test]
  fn test_blank_rows_coerce_to_zero() {
    let items = line_items_from(vec![dto("", "abc")]).unwrap();
    assert_eq!(items[0].amount(), dec!(0));
  }

  #[test]
  fn test_negative_input_is_rejected_not_swallowed() {
    assert!(line_items_from(vec![dto("-2", "500")]).is_err());
    assert!(line_items_from(vec![dto("2", "-500")]).is_err());
  }

  #[test]
  fn test_discount_defaults_to_zero_and_keeps_bounds() {
    assert_eq!(discount_from(None).unwrap(), DiscountPercent::zero());
    assert_eq!(discount_from(Some("")).unwrap(), DiscountPercent::zero());
    assert_eq!(
      discount_from(Some("12.5")).unwrap().value(),
      dec!(12.5)
    );
    assert!(discount_from(Some("120")).is_err());
  }
}
