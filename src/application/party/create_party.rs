use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::party::{
  Email, Gstin, MobileNumber, PartyAddress, PartyData, PartyError, PartyName, PartyService,
  Pincode, StateName,
};

#[derive(Debug, Deserialize)]
pub struct CreatePartyCommand {
  pub owner_id: Uuid,
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
pub struct CreatePartyResponse {
  pub party_id: Uuid,
  pub company_name: String,
  pub created_at: DateTime<Utc>,
}

pub struct CreatePartyUseCase {
  party_service: Arc<PartyService>,
}

impl CreatePartyUseCase {
  pub fn new(party_service: Arc<PartyService>) -> Self {
    Self { party_service }
  }

  pub async fn execute(
    &self,
    command: CreatePartyCommand,
  ) -> Result<CreatePartyResponse, PartyError> {
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

    let party = self.party_service.create_party(command.owner_id, data).await?;

    Ok(CreatePartyResponse {
      party_id: party.id,
      company_name: party.company_name.into_inner(),
      created_at: party.created_at,
    })
  }
}

/// Validates raw form fields into party value objects. Optional fields
/// submitted as empty strings count as absent.
#[allow(clippy::too_many_arguments)]
pub(crate) fn party_data_from(
  company_name: String,
  gstin: Option<String>,
  mobile_no: Option<String>,
  email: Option<String>,
  plot_house_no: Option<String>,
  line1: Option<String>,
  area: Option<String>,
  landmark: Option<String>,
  city: Option<String>,
  state: String,
  pincode: Option<String>,
) -> Result<PartyData, PartyError> {
  let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

  let company_name = PartyName::new(company_name)?;
  let gstin = non_blank(gstin).map(Gstin::new).transpose()?;
  let mobile_no = non_blank(mobile_no).map(MobileNumber::new).transpose()?;
  let email = non_blank(email).map(Email::new).transpose()?;
  let pincode = non_blank(pincode).map(Pincode::new).transpose()?;
  let state = StateName::new(state)?;

  Ok(PartyData {
    company_name,
    gstin,
    mobile_no,
    email,
    address: PartyAddress::new(
      non_blank(plot_house_no),
      non_blank(line1),
      non_blank(area),
      non_blank(landmark),
      non_blank(city),
      state,
      pincode,
    ),
  })
}
