use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  BillUpdateData, BillingError, BillingService, GstRate, PaymentMethod,
  parse::parse_amount_or_zero,
};

use super::create_bill::{LineItemDto, discount_from, line_items_from};

#[derive(Debug, Deserialize)]
pub struct UpdateBillCommand {
  pub owner_id: Uuid,
  pub bill_id: Uuid,
  pub bill_date: NaiveDate,
  pub party_id: Uuid,
  pub items: Vec<LineItemDto>,
  pub discount_percent: Option<String>,
  pub gst_rate: String,
  pub payment_method: String,
  pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateBillResponse {
  pub bill_id: Uuid,
  pub bill_no: i64,
  pub rounded_total: rust_decimal::Decimal,
  pub updated_at: DateTime<Utc>,
}

pub struct UpdateBillUseCase {
  billing_service: Arc<BillingService>,
}

impl UpdateBillUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: UpdateBillCommand,
  ) -> Result<UpdateBillResponse, BillingError> {
    let data = BillUpdateData {
      bill_date: command.bill_date,
      party_id: command.party_id,
      items: line_items_from(command.items)?,
      discount: discount_from(command.discount_percent.as_deref())?,
      gst_rate: GstRate::new(parse_amount_or_zero(&command.gst_rate))?,
      payment_method: command.payment_method.parse::<PaymentMethod>()?,
      notes: command.notes.filter(|n| !n.trim().is_empty()),
    };

    let bill = self
      .billing_service
      .update_bill(command.owner_id, command.bill_id, data)
      .await?;

    Ok(UpdateBillResponse {
      bill_id: bill.id,
      bill_no: bill.bill_no,
      rounded_total: bill.amounts.rounded_total,
      updated_at: bill.updated_at,
    })
  }
}
