use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::billing::{
  BillStatus, BillingError, BillingService, PaymentData, PaymentMethod, Percent,
  parse::parse_amount_or_zero,
};

#[derive(Debug, Deserialize)]
pub struct RecordPaymentCommand {
  pub owner_id: Uuid,
  pub bill_id: Uuid,
  pub method: String,
  pub amount: String,
  pub tds_percent: Option<String>,
  pub other_claim_percent: Option<String>,
  pub brokerage_percent: Option<String>,
  pub broker_name: Option<String>,
  pub broker_phone: Option<String>,
  pub cheque_no: Option<String>,
  pub bank_name: Option<String>,
  pub upi_id: Option<String>,
  pub upi_name: Option<String>,
  pub rtgs_neft_no: Option<String>,
  pub paid_on: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct RecordPaymentResponse {
  pub bill_id: Uuid,
  pub status: BillStatus,
  pub tds_amount: rust_decimal::Decimal,
  pub brokerage_amount: rust_decimal::Decimal,
}

pub struct RecordPaymentUseCase {
  billing_service: Arc<BillingService>,
}

impl RecordPaymentUseCase {
  pub fn new(billing_service: Arc<BillingService>) -> Self {
    Self { billing_service }
  }

  pub async fn execute(
    &self,
    command: RecordPaymentCommand,
  ) -> Result<RecordPaymentResponse, BillingError> {
    let percent = |input: Option<&str>| -> Result<Percent, BillingError> {
      Ok(Percent::new(parse_amount_or_zero(input.unwrap_or("")))?)
    };

    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let data = PaymentData {
      method: command.method.parse::<PaymentMethod>()?,
      amount: parse_amount_or_zero(&command.amount),
      tds_percent: percent(command.tds_percent.as_deref())?,
      other_claim_percent: percent(command.other_claim_percent.as_deref())?,
      brokerage_percent: percent(command.brokerage_percent.as_deref())?,
      broker_name: non_blank(command.broker_name),
      broker_phone: non_blank(command.broker_phone),
      cheque_no: non_blank(command.cheque_no),
      bank_name: non_blank(command.bank_name),
      upi_id: non_blank(command.upi_id),
      upi_name: non_blank(command.upi_name),
      rtgs_neft_no: non_blank(command.rtgs_neft_no),
      paid_on: command.paid_on,
    };

    let bill = self
      .billing_service
      .record_payment(command.owner_id, command.bill_id, data)
      .await?;

    let payment = bill
      .payment
      .as_ref()
      .ok_or_else(|| BillingError::Internal("Payment missing after recording".to_string()))?;

    Ok(RecordPaymentResponse {
      bill_id: bill.id,
      status: bill.status,
      tds_amount: payment.tds_amount,
      brokerage_amount: payment.brokerage_amount,
    })
  }
}
