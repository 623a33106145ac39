use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct DeleteBillCommand {
  pub owner_id: Uuid,
  pub bill_id: Uuid,
}

pub struct DeleteBillUseCase {
  billing_service: Arc<BillingService>,
}

impl DeleteBillUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: DeleteBillCommand) -> Result<(), BillingError> {
    self
      .billing_service
      .delete_bill(command.owner_id, command.bill_id)
      .await
  }
}
