use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::party::{PartyError, PartyService};

use super::list_parties::PartyDto;

#[derive(Debug, Deserialize)]
pub struct GetPartyCommand {
  pub owner_id: Uuid,
  pub party_id: Uuid,
}

pub struct GetPartyUseCase {
  party_service: Arc<PartyService>,
}

impl GetPartyUseCase {
  pub fn new(party_service: Arc<PartyService>) -> Self {
    Self { party_service }
  }

  pub async fn execute(&self, command: GetPartyCommand) -> Result<PartyDto, PartyError> {
    let party = self
      .party_service
      .get_party(command.owner_id, command.party_id)
      .await?;

    Ok(PartyDto::from(party))
  }
}
