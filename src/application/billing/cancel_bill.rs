use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillStatus, BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct CancelBillCommand {
  pub owner_id: Uuid,
  pub bill_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CancelBillResponse {
  pub bill_id: Uuid,
  pub status: BillStatus,
}

pub struct CancelBillUseCase {
  billing_service: Arc<BillingService>,
}

impl CancelBillUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: CancelBillCommand,
  ) -> Result<CancelBillResponse, BillingError> {
    let bill = self
      .billing_service
      .cancel_bill(command.owner_id, command.bill_id)
      .await?;

    Ok(CancelBillResponse {
      bill_id: bill.id,
      status: bill.status,
    })
  }
}
