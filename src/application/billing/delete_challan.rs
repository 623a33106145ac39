use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct DeleteChallanCommand {
  pub owner_id: Uuid,
  pub challan_id: Uuid,
}

pub struct DeleteChallanUseCase {
  billing_service: Arc<BillingService>,
}

impl DeleteChallanUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: DeleteChallanCommand) -> Result<(), BillingError> {
    self
      .billing_service
      .delete_challan(command.owner_id, command.challan_id)
      .await
  }
}
