use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, DocumentType};

#[derive(Debug, Deserialize)]
pub struct PeekNextNumberCommand {
  pub owner_id: Uuid,
  pub document_type: String,
}

#[derive(Debug, Serialize)]
pub struct PeekNextNumberResponse {
  pub document_type: DocumentType,
  pub next_number: i64,
  /// Set when the counter could not be read and the sequence was assumed to
  /// start at 1. Shown to the user as a warning; creation itself will still
  /// allocate transactionally.
  pub fallback: bool,
}

pub struct PeekNextNumberUseCase {
  billing_service: Arc<BillingService>,
}

impl PeekNextNumberUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: PeekNextNumberCommand,
  ) -> Result<PeekNextNumberResponse, BillingError> {
    let document_type = DocumentType::from_str(&command.document_type)?;
    let next = self
      .billing_service
      .peek_next_number(command.owner_id, document_type)
      .await;

    Ok(PeekNextNumberResponse {
      document_type,
      next_number: next.value,
      fallback: next.fallback,
    })
  }
}
