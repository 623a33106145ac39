use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct ListChallansCommand {
  pub owner_id: Uuid,
  pub party_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChallanSummaryDto {
  pub id: Uuid,
  pub challan_no: i64,
  pub challan_date: NaiveDate,
  pub party_id: Uuid,
  pub party_name: String,
  pub rounded_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ListChallansResponse {
  pub challans: Vec<ChallanSummaryDto>,
}

pub struct ListChallansUseCase {
  billing_service: Arc<BillingService>,
}

impl ListChallansUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: ListChallansCommand,
  ) -> Result<ListChallansResponse, BillingError> {
    let challans = self
      .billing_service
      .list_challans(command.owner_id, command.party_id)
      .await?;

    let challans = challans
      .into_iter()
      .map(|challan| ChallanSummaryDto {
        id: challan.id,
        challan_no: challan.challan_no,
        challan_date: challan.challan_date,
        party_id: challan.party_id,
        party_name: challan.party.company_name,
        rounded_total: challan.amounts.rounded_total,
      })
      .collect();

    Ok(ListChallansResponse { challans })
  }
}
