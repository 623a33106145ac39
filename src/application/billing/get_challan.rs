use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  AmountBreakdown, BillingError, BillingService, LineItem, PartySnapshot,
};

#[derive(Debug, Deserialize)]
pub struct GetChallanCommand {
  pub owner_id: Uuid,
  pub challan_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChallanDetailsDto {
  pub id: Uuid,
  pub challan_no: i64,
  pub challan_date: NaiveDate,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

pub struct GetChallanUseCase {
  billing_service: Arc<BillingService>,
}

impl GetChallanUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: GetChallanCommand,
  ) -> Result<ChallanDetailsDto, BillingError> {
    let challan = self
      .billing_service
      .get_challan(command.owner_id, command.challan_id)
      .await?;

    Ok(ChallanDetailsDto {
      id: challan.id,
      challan_no: challan.challan_no,
      challan_date: challan.challan_date,
      party: challan.party,
      items: challan.items,
      amounts: challan.amounts,
      notes: challan.notes,
      created_at: challan.created_at,
      updated_at: challan.updated_at,
    })
  }
}
