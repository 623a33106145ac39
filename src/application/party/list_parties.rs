use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::party::{Party, PartyError, PartyService};

#[derive(Debug, Deserialize)]
pub struct ListPartiesCommand {
  pub owner_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PartyDto {
  pub id: Uuid,
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
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Party> for PartyDto {
  fn from(party: Party) -> Self {
    Self {
      id: party.id,
      company_name: party.company_name.value().to_string(),
      gstin: party.gstin.map(|g| g.value().to_string()),
      mobile_no: party.mobile_no.map(|m| m.value().to_string()),
      email: party.email.map(|e| e.value().to_string()),
      plot_house_no: party.address.plot_house_no.clone(),
      line1: party.address.line1.clone(),
      area: party.address.area.clone(),
      landmark: party.address.landmark.clone(),
      city: party.address.city.clone(),
      state: party.address.state.value().to_string(),
      pincode: party.address.pincode.as_ref().map(|p| p.value().to_string()),
      created_at: party.created_at,
      updated_at: party.updated_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListPartiesResponse {
  pub parties: Vec<PartyDto>,
}

pub struct ListPartiesUseCase {
  party_service: Arc<PartyService>,
}

impl ListPartiesUseCase {
  pub fn new(party_service: Arc<PartyService>) -> Self {
    Self { party_service }
  }

  pub async fn execute(
    &self,
    command: ListPartiesCommand,
  ) -> Result<ListPartiesResponse, PartyError> {
    let parties = self.party_service.list_parties(command.owner_id).await?;

    Ok(ListPartiesResponse {
      parties: parties.into_iter().map(PartyDto::from).collect(),
    })
  }
}
