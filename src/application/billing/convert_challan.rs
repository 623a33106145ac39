use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillStatus, BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct ConvertChallanCommand {
  pub owner_id: Uuid,
  pub challan_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ConvertChallanResponse {
  pub bill_id: Uuid,
  pub bill_no: i64,
  pub challan_no: Option<i64>,
  pub status: BillStatus,
  pub rounded_total: rust_decimal::Decimal,
  pub created_at: DateTime<Utc>,
}

/// Turns an existing challan into a pending tax invoice with a freshly
/// allocated bill number, applying the configured default GST rate. The
/// source challan is left untouched.
pub struct ConvertChallanUseCase {
  billing_service: Arc<BillingService>,
}

impl ConvertChallanUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: ConvertChallanCommand,
  ) -> Result<ConvertChallanResponse, BillingError> {
    let bill = self
      .billing_service
      .convert_challan(command.owner_id, command.challan_id)
      .await?;

    Ok(ConvertChallanResponse {
      bill_id: bill.id,
      bill_no: bill.bill_no,
      challan_no: bill.challan_no,
      status: bill.status,
      rounded_total: bill.amounts.rounded_total,
      created_at: bill.created_at,
    })
  }
}
