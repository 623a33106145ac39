use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Party;
use super::errors::PartyError;

/// Repository trait for party persistence. Every lookup is scoped by the
/// owning user: a party is only visible to its creator.
#[async_trait]
pub trait PartyRepository: Send + Sync {
  async fn create(&self, party: Party) -> Result<Party, PartyError>;
  async fn update(&self, party: Party) -> Result<Party, PartyError>;
  async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Party>, PartyError>;
  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Party>, PartyError>;
  async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), PartyError>;
}
