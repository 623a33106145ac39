use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, ChallanUpdateData};

use super::create_bill::{LineItemDto, discount_from, line_items_from};

#[derive(Debug, Deserialize)]
pub struct UpdateChallanCommand {
  pub owner_id: Uuid,
  pub challan_id: Uuid,
  pub challan_date: NaiveDate,
  pub party_id: Uuid,
  pub items: Vec<LineItemDto>,
  pub discount_percent: Option<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateChallanResponse {
  pub challan_id: Uuid,
  pub challan_no: i64,
  pub rounded_total: rust_decimal::Decimal,
  pub updated_at: DateTime<Utc>,
}

pub struct UpdateChallanUseCase {
  billing_service: Arc<BillingService>,
}

impl UpdateChallanUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: UpdateChallanCommand,
  ) -> Result<UpdateChallanResponse, BillingError> {
    let data = ChallanUpdateData {
      challan_date: command.challan_date,
      party_id: command.party_id,
      items: line_items_from(command.items)?,
      discount: discount_from(command.discount_percent.as_deref())?,
      notes: command.notes.filter(|n| !n.trim().is_empty()),
    };

    let challan = self
      .billing_service
      .update_challan(command.owner_id, command.challan_id, data)
      .await?;

    Ok(UpdateChallanResponse {
      challan_id: challan.id,
      challan_no: challan.challan_no,
      rounded_total: challan.amounts.rounded_total,
      updated_at: challan.updated_at,
    })
  }
}
