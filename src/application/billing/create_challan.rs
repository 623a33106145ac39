use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillingError, BillingService, ChallanData};

use super::create_bill::{LineItemDto, discount_from, line_items_from, number_assignment_from};

#[derive(Debug, Deserialize)]
pub struct CreateChallanCommand {
  pub owner_id: Uuid,
  pub challan_no: Option<i64>,
  pub challan_date: NaiveDate,
  pub party_id: Uuid,
  pub items: Vec<LineItemDto>,
  pub discount_percent: Option<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateChallanResponse {
  pub challan_id: Uuid,
  pub challan_no: i64,
  pub rounded_total: rust_decimal::Decimal,
  pub created_at: DateTime<Utc>,
}

pub struct CreateChallanUseCase {
  billing_service: Arc<BillingService>,
}

impl CreateChallanUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: CreateChallanCommand,
  ) -> Result<CreateChallanResponse, BillingError> {
    let data = ChallanData {
      number: number_assignment_from(command.challan_no),
      challan_date: command.challan_date,
      party_id: command.party_id,
      items: line_items_from(command.items)?,
      discount: discount_from(command.discount_percent.as_deref())?,
      notes: command.notes.filter(|n| !n.trim().is_empty()),
    };

    let challan = self
      .billing_service
      .create_challan(command.owner_id, data)
      .await?;

    Ok(CreateChallanResponse {
      challan_id: challan.id,
      challan_no: challan.challan_no,
      rounded_total: challan.amounts.rounded_total,
      created_at: challan.created_at,
    })
  }
}
