use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Bill, BillDraft, Challan, ChallanDraft};
use super::errors::BillingError;
use super::value_objects::{BillStatus, DocumentType};

/// Preview of the next document number for an owner. `fallback` is set when
/// the counter could not be read and the sequence was assumed to start at 1;
/// callers surface it as a warning rather than blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextNumber {
  pub value: i64,
  pub fallback: bool,
}

/// The per-owner, per-document-type sequence counters.
///
/// `peek_next` is a non-reserving preview for forms. The binding allocation
/// happens inside the document repositories: the counter increment and the
/// document insert commit in one transaction, so a number is never issued
/// without its document and two concurrent creations cannot share one.
#[async_trait]
pub trait CounterStore: Send + Sync {
  async fn peek_next(&self, owner_id: Uuid, document_type: DocumentType) -> NextNumber;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BillFilter {
  pub party_id: Option<Uuid>,
  pub status: Option<BillStatus>,
}

#[async_trait]
pub trait BillRepository: Send + Sync {
  /// Persists the draft, committing its number atomically with the insert.
  /// An explicit number that is already taken fails with
  /// [`BillingError::NumberAlreadyExists`]; nothing is written.
  async fn create(&self, draft: BillDraft) -> Result<Bill, BillingError>;
  async fn update(&self, bill: Bill) -> Result<Bill, BillingError>;
  async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Bill>, BillingError>;
  async fn find_by_owner(
    &self,
    owner_id: Uuid,
    filter: BillFilter,
  ) -> Result<Vec<Bill>, BillingError>;
  async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), BillingError>;
}

#[async_trait]
pub trait ChallanRepository: Send + Sync {
  async fn create(&self, draft: ChallanDraft) -> Result<Challan, BillingError>;
  async fn update(&self, challan: Challan) -> Result<Challan, BillingError>;
  async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Challan>, BillingError>;
  async fn find_by_owner(
    &self,
    owner_id: Uuid,
    party_id: Option<Uuid>,
  ) -> Result<Vec<Challan>, BillingError>;
  async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), BillingError>;
}
