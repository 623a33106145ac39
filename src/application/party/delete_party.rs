use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::party::{PartyError, PartyService};

#[derive(Debug, Deserialize)]
pub struct DeletePartyCommand {
  pub owner_id: Uuid,
  pub party_id: Uuid,
}

pub struct DeletePartyUseCase {
  party_service: Arc<PartyService>,
}

impl DeletePartyUseCase {
  pub fn new(party_service: Arc<PartyService>) -> Self {
    Self { party_service }
  }

  pub async fn execute(&self, command: DeletePartyCommand) -> Result<(), PartyError> {
    self
      .party_service
      .delete_party(command.owner_id, command.party_id)
      .await
  }
}
