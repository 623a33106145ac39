use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{BillFilter, BillStatus, BillingError, BillingService};

#[derive(Debug, Deserialize)]
pub struct ListBillsCommand {
  pub owner_id: Uuid,
  pub party_id: Option<Uuid>,
  pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BillSummaryDto {
  pub id: Uuid,
  pub bill_no: i64,
  pub challan_no: Option<i64>,
  pub bill_date: NaiveDate,
  pub party_id: Uuid,
  pub party_name: String,
  pub rounded_total: Decimal,
  pub status: BillStatus,
}

#[derive(Debug, Serialize)]
pub struct ListBillsResponse {
  pub bills: Vec<BillSummaryDto>,
}

pub struct ListBillsUseCase {
  billing_service: Arc<BillingService>,
}

impl ListBillsUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(&self, command: ListBillsCommand) -> Result<ListBillsResponse, BillingError> {
    let status = command
      .status
      .as_deref()
      .map(BillStatus::from_str)
      .transpose()?;

    let bills = self
      .billing_service
      .list_bills(
        command.owner_id,
        BillFilter {
          party_id: command.party_id,
          status,
        },
      )
      .await?;

    let bills = bills
      .into_iter()
      .map(|bill| BillSummaryDto {
        id: bill.id,
        bill_no: bill.bill_no,
        challan_no: bill.challan_no,
        bill_date: bill.bill_date,
        party_id: bill.party_id,
        party_name: bill.party.company_name,
        rounded_total: bill.amounts.rounded_total,
        status: bill.status,
      })
      .collect();

    Ok(ListBillsResponse { bills })
  }
}
