use thiserror::Error;
use uuid::Uuid;

use super::value_objects::{BillStatus, DocumentType, PaymentMethod, ValueObjectError};

/// Errors raised by entity-level operations (status guards, settlement
/// field checks).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingEntityError {
  #[error("Invalid status transition: {from} -> {to}")]
  InvalidStatusTransition { from: BillStatus, to: BillStatus },

  #[error("Cannot edit a {status} bill")]
  NotEditable { status: BillStatus },

  #[error("Payment method '{}' requires '{field}'", method.as_str())]
  PaymentFieldMissing {
    method: PaymentMethod,
    field: &'static str,
  },

  #[error("No payment recorded on this bill")]
  NoPaymentRecorded,
}

#[derive(Debug, Error)]
pub enum BillingError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Validation error: {0}")]
  PartyValidation(#[from] crate::domain::party::ValueObjectError),

  #[error(transparent)]
  Entity(#[from] BillingEntityError),

  #[error("Party not found: {0}")]
  PartyNotFound(Uuid),

  #[error("Bill not found: {0}")]
  BillNotFound(Uuid),

  #[error("Challan not found: {0}")]
  ChallanNotFound(Uuid),

  #[error("{} number {number} already exists", document_type.as_str())]
  NumberAlreadyExists {
    document_type: DocumentType,
    number: i64,
  },

  #[error("Timed out allocating the next {} number", document_type.as_str())]
  AllocationTimeout { document_type: DocumentType },

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
