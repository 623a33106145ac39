use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::party::{PartyError, PartyService};

use super::create_party::party_data_from;

#[derive(Debug, Deserialize)]
pub struct UpdatePartyCommand {
  pub owner_id: Uuid,
  pub party_id: Uuid,
  pub company_name: String,
  pub gstin: Option<String>,
  pub mobile_no: Option<String>,
  pub email: Option<String>,
  pub plot_house_no: Option<String>,
  pub line1: Option<String>,
  pub area: Option<String>,
  pub landmark: Option<String>,
  pub city: Option<String>,
  pub state: String,
  pub pincode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePartyResponse {
  pub party_id: Uuid,
  pub updated_at: DateTime<Utc>,
}

pub struct UpdatePartyUseCase {
  party_service: Arc<PartyService>,
}

impl UpdatePartyUseCase {
  pub fn new(party_service: Arc<PartyService>) -> Self {
    Self { party_service }
  }

  pub async fn execute(
    &self,
    command: UpdatePartyCommand,
  ) -> Result<UpdatePartyResponse, PartyError> {
    let data = party_data_from(
      command.company_name,
      command.gstin,
      command.mobile_no,
      command.email,
      command.plot_house_no,
      command.line1,
      command.area,
      command.landmark,
      command.city,
      command.state,
      command.pincode,
    )?;

    let party = self
      .party_service
      .update_party(command.owner_id, command.party_id, data)
      .await?;

    Ok(UpdatePartyResponse {
      party_id: party.id,
      updated_at: party.updated_at,
    })
  }
}
