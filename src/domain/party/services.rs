use std::sync::Arc;
use uuid::Uuid;

use super::entities::Party;
use super::errors::PartyError;
use super::ports::PartyRepository;
use super::value_objects::{Email, Gstin, MobileNumber, PartyAddress, PartyName};

/// Party creation/update data, already validated into value objects.
pub struct PartyData {
  pub company_name: PartyName,
  pub gstin: Option<Gstin>,
  pub mobile_no: Option<MobileNumber>,
  pub email: Option<Email>,
  pub address: PartyAddress,
}

pub struct PartyService {
  party_repo: Arc<dyn PartyRepository>,
}

impl PartyService {
  pub fn new(party_repo: Arc<dyn PartyRepository>) -> Self {
    Self { party_repo }
  }

  pub async fn create_party(&self, owner_id: Uuid, data: PartyData) -> Result<Party, PartyError> {
    let party = Party::new(
      owner_id,
      data.company_name,
      data.gstin,
      data.mobile_no,
      data.email,
      data.address,
    );
    self.party_repo.create(party).await
  }

  pub async fn update_party(
    &self,
    owner_id: Uuid,
    party_id: Uuid,
    data: PartyData,
  ) -> Result<Party, PartyError> {
    let mut party = self
      .party_repo
      .find_by_id(owner_id, party_id)
      .await?
      .ok_or(PartyError::NotFound(party_id))?;

    party.update(
      data.company_name,
      data.gstin,
      data.mobile_no,
      data.email,
      data.address,
    );
    self.party_repo.update(party).await
  }

  pub async fn get_party(&self, owner_id: Uuid, party_id: Uuid) -> Result<Party, PartyError> {
    self
      .party_repo
      .find_by_id(owner_id, party_id)
      .await?
      .ok_or(PartyError::NotFound(party_id))
  }

  pub async fn list_parties(&self, owner_id: Uuid) -> Result<Vec<Party>, PartyError> {
    self.party_repo.find_by_owner(owner_id).await
  }

  pub async fn delete_party(&self, owner_id: Uuid, party_id: Uuid) -> Result<(), PartyError> {
    // Verify existence first so a missing id reports 404, not silent success
    self
      .party_repo
      .find_by_id(owner_id, party_id)
      .await?
      .ok_or(PartyError::NotFound(party_id))?;

    self.party_repo.delete(owner_id, party_id).await
  }
}
