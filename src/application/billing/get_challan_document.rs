use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, ChallanDocument};

#[derive(Debug, Deserialize)]
pub struct GetChallanDocumentCommand {
  pub owner_id: Uuid,
  pub challan_id: Uuid,
}

pub struct GetChallanDocumentUseCase {
  billing_service: Arc<BillingService>,
}

impl GetChallanDocumentUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: GetChallanDocumentCommand,
  ) -> Result<ChallanDocument, BillingError> {
    self
      .billing_service
      .challan_document(command.owner_id, command.challan_id)
      .await
  }
}
