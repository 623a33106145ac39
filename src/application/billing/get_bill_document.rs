use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillDocument, BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct GetBillDocumentCommand {
  pub owner_id: Uuid,
  pub bill_id: Uuid,
}

/// Assembles the fully-computed printable payload for a bill: the frozen
/// amount breakdown, the party snapshot, the issuer profile, and the
/// amount-in-words line. The external PDF renderer consumes this as-is.
pub struct GetBillDocumentUseCase {
  billing_service: Arc<BillingService>,
}

impl GetBillDocumentUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: GetBillDocumentCommand,
  ) -> Result<BillDocument, BillingError> {
    self
      .billing_service
      .bill_document(command.owner_id, command.bill_id)
      .await
  }
}
