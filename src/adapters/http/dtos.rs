use serde::{Deserialize, Serialize};
use validator::Validate;

/// Standard error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<String>,
}

/// Party create/update payload. Format-level validation happens here; the
/// GSTIN/mobile/pincode shape checks live in the domain value objects.
#[derive(Debug, Deserialize, Validate)]
pub struct PartyRequest {
  #[validate(length(min = 1, max = 255, message = "Company name must be 1-255 characters"))]
  pub company_name: String,
  pub gstin: Option<String>,
  pub mobile_no: Option<String>,
  pub email: Option<String>,
  pub plot_house_no: Option<String>,
  pub line1: Option<String>,
  pub area: Option<String>,
  pub landmark: Option<String>,
  pub city: Option<String>,
  #[validate(length(min = 1, max = 100, message = "State is required"))]
  pub state: String,
  pub pincode: Option<String>,
}

/// One item row of a bill or challan form. Quantity and unit price are
/// free-text on purpose; parsing policy is explicit downstream.
#[derive(Debug, Deserialize, Validate)]
pub struct LineItemRequest {
  #[validate(length(min = 1, max = 255, message = "Item name must be 1-255 characters"))]
  pub name: String,
  pub hsn_code: Option<String>,
  pub quantity: String,
  pub unit_price: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBillRequest {
  pub bill_no: Option<i64>,
  pub bill_date: chrono::NaiveDate,
  pub party_id: uuid::Uuid,
  pub challan_no: Option<i64>,
  #[validate(nested)]
  pub items: Vec<LineItemRequest>,
  pub discount_percent: Option<String>,
  pub gst_rate: String,
  pub payment_method: String,
  #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
  pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBillRequest {
  pub bill_date: chrono::NaiveDate,
  pub party_id: uuid::Uuid,
  #[validate(nested)]
  pub items: Vec<LineItemRequest>,
  pub discount_percent: Option<String>,
  pub gst_rate: String,
  pub payment_method: String,
  #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
  pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChallanRequest {
  pub challan_no: Option<i64>,
  pub challan_date: chrono::NaiveDate,
  pub party_id: uuid::Uuid,
  #[validate(nested)]
  pub items: Vec<LineItemRequest>,
  pub discount_percent: Option<String>,
  #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
  pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChallanRequest {
  pub challan_date: chrono::NaiveDate,
  pub party_id: uuid::Uuid,
  #[validate(nested)]
  pub items: Vec<LineItemRequest>,
  pub discount_percent: Option<String>,
  #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
  pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
  pub method: String,
  pub amount: String,
  pub tds_percent: Option<String>,
  pub other_claim_percent: Option<String>,
  pub brokerage_percent: Option<String>,
  #[validate(length(max = 255))]
  pub broker_name: Option<String>,
  #[validate(length(max = 20))]
  pub broker_phone: Option<String>,
  #[validate(length(max = 50))]
  pub cheque_no: Option<String>,
  #[validate(length(max = 255))]
  pub bank_name: Option<String>,
  #[validate(length(max = 255))]
  pub upi_id: Option<String>,
  #[validate(length(max = 255))]
  pub upi_name: Option<String>,
  #[validate(length(max = 50))]
  pub rtgs_neft_no: Option<String>,
  pub paid_on: chrono::NaiveDate,
}

/// Query parameters for bill listing
#[derive(Debug, Deserialize)]
pub struct BillListQuery {
  pub party_id: Option<uuid::Uuid>,
  pub status: Option<String>,
}

/// Query parameters for challan listing
#[derive(Debug, Deserialize)]
pub struct ChallanListQuery {
  pub party_id: Option<uuid::Uuid>,
}
