use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Email, Gstin, MobileNumber, PartyAddress, PartyName};

// Party - a customer a bill or challan is raised against.
// Bills copy the party into a frozen snapshot at creation time, so edits
// here never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
  pub id: Uuid,
  pub company_name: PartyName,
  pub gstin: Option<Gstin>,
  pub mobile_no: Option<MobileNumber>,
  pub email: Option<Email>,
  pub address: PartyAddress,
  pub created_by: Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Party {
  pub fn new(
    created_by: Uuid,
    company_name: PartyName,
    gstin: Option<Gstin>,
    mobile_no: Option<MobileNumber>,
    email: Option<Email>,
    address: PartyAddress,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      company_name,
      gstin,
      mobile_no,
      email,
      address,
      created_by,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(
    &mut self,
    company_name: PartyName,
    gstin: Option<Gstin>,
    mobile_no: Option<MobileNumber>,
    email: Option<Email>,
    address: PartyAddress,
  ) {
    self.company_name = company_name;
    self.gstin = gstin;
    self.mobile_no = mobile_no;
    self.email = email;
    self.address = address;
    self.updated_at = Utc::now();
  }
}
