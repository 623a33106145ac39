use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillStatus, BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct RemovePaymentCommand {
  pub owner_id: Uuid,
  pub bill_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RemovePaymentResponse {
  pub bill_id: Uuid,
  pub status: BillStatus,
}

pub struct RemovePaymentUseCase {
  billing_service: Arc<BillingService>,
}

impl RemovePaymentUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: RemovePaymentCommand,
  ) -> Result<RemovePaymentResponse, BillingError> {
    let bill = self
      .billing_service
      .remove_payment(command.owner_id, command.bill_id)
      .await?;

    Ok(RemovePaymentResponse {
      bill_id: bill.id,
      status: bill.status,
    })
  }
}
