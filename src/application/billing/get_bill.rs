use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  AmountBreakdown, BillStatus, BillingError, BillingService, LineItem, PartySnapshot,
  PaymentDetails, PaymentMethod,
};

#[derive(Debug, Deserialize)]
pub struct GetBillCommand {
  pub owner_id: Uuid,
  pub bill_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BillDetailsDto {
  pub id: Uuid,
  pub bill_no: i64,
  pub challan_no: Option<i64>,
  pub bill_date: NaiveDate,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub status: BillStatus,
  pub payment_method: PaymentMethod,
  pub payment: Option<PaymentDetails>,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

pub struct GetBillUseCase {
  billing_service: Arc<BillingService>,
}

impl GetBillUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: GetBillCommand) -> Result<BillDetailsDto, BillingError> {
    let bill = self
      .billing_service
      .get_bill(command.owner_id, command.bill_id)
      .await?;

    Ok(BillDetailsDto {
      id: bill.id,
      bill_no: bill.bill_no,
      challan_no: bill.challan_no,
      bill_date: bill.bill_date,
      party: bill.party,
      items: bill.items,
      amounts: bill.amounts,
      status: bill.status,
      payment_method: bill.payment_method,
      payment: bill.payment,
      notes: bill.notes,
      created_at: bill.created_at,
      updated_at: bill.updated_at,
    })
  }
}
