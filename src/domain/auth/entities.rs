use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated owner of the current request. Every record in the
/// system is scoped by this id: a party, bill, or challan is only visible
/// to its creator.
///
/// Passed explicitly into services instead of being read from ambient
/// state, so the billing logic stays pure and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
  pub id: Uuid,
}

impl Owner {
  pub fn new(id: Uuid) -> Self {
    Self { id }
  }
}
