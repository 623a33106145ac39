use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::dtos::{
  BillListQuery, CreateBillRequest, LineItemRequest, RecordPaymentRequest, UpdateBillRequest,
};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::RequestOwner;
use crate::application::billing::{
  CancelBillCommand, CancelBillUseCase, CreateBillCommand, CreateBillUseCase, DeleteBillCommand,
  DeleteBillUseCase, GetBillCommand, GetBillDocumentCommand, GetBillDocumentUseCase,
  GetBillUseCase, LineItemDto, ListBillsCommand, ListBillsUseCase, PeekNextNumberCommand,
  PeekNextNumberUseCase, RecordPaymentCommand, RecordPaymentUseCase, RemovePaymentCommand,
  RemovePaymentUseCase, UpdateBillCommand, UpdateBillUseCase,
};

pub(crate) fn line_items(items: Vec<LineItemRequest>) -> Vec<LineItemDto> {
  items
    .into_iter()
    .map(|item| LineItemDto {
      name: item.name,
      hsn_code: item.hsn_code,
      quantity: item.quantity,
      unit_price: item.unit_price,
    })
    .collect()
}

// POST /bills
pub async fn create_bill(
  req: HttpRequest,
  payload: web::Json<CreateBillRequest>,
  use_case: web::Data<Arc<CreateBillUseCase>>,
) -> Result<HttpResponse, ApiError> {
  payload.validate()?;
  let owner = req.owner();
  let payload = payload.into_inner();

  let response = use_case
    .execute(CreateBillCommand {
      owner_id: owner.id,
      bill_no: payload.bill_no,
      bill_date: payload.bill_date,
      party_id: payload.party_id,
      challan_no: payload.challan_no,
      items: line_items(payload.items),
      discount_percent: payload.discount_percent,
      gst_rate: payload.gst_rate,
      payment_method: payload.payment_method,
      notes: payload.notes,
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}

// GET /bills
pub async fn list_bills(
  req: HttpRequest,
  query: web::Query<BillListQuery>,
  use_case: web::Data<Arc<ListBillsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();
  let query = query.into_inner();

  let response = use_case
    .execute(ListBillsCommand {
      owner_id: owner.id,
      party_id: query.party_id,
      status: query.status,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// GET /bills/{id}
pub async fn get_bill(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetBillUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(GetBillCommand {
      owner_id: owner.id,
      bill_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// GET /bills/{id}/document - printable payload for the PDF renderer
pub async fn get_bill_document(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetBillDocumentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let document = use_case
    .execute(GetBillDocumentCommand {
      owner_id: owner.id,
      bill_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(document))
}

// PUT /bills/{id}
pub async fn update_bill(
  req: HttpRequest,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateBillRequest>,
  use_case: web::Data<Arc<UpdateBillUseCase>>,
) -> Result<HttpResponse, ApiError> {
  payload.validate()?;
  let owner = req.owner();
  let payload = payload.into_inner();

  let response = use_case
    .execute(UpdateBillCommand {
      owner_id: owner.id,
      bill_id: path.into_inner(),
      bill_date: payload.bill_date,
      party_id: payload.party_id,
      items: line_items(payload.items),
      discount_percent: payload.discount_percent,
      gst_rate: payload.gst_rate,
      payment_method: payload.payment_method,
      notes: payload.notes,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// DELETE /bills/{id}
pub async fn delete_bill(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteBillUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  use_case
    .execute(DeleteBillCommand {
      owner_id: owner.id,
      bill_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}

// POST /bills/{id}/payment
pub async fn record_payment(
  req: HttpRequest,
  path: web::Path<Uuid>,
  payload: web::Json<RecordPaymentRequest>,
  use_case: web::Data<Arc<RecordPaymentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  payload.validate()?;
  let owner = req.owner();
  let payload = payload.into_inner();

  let response = use_case
    .execute(RecordPaymentCommand {
      owner_id: owner.id,
      bill_id: path.into_inner(),
      method: payload.method,
      amount: payload.amount,
      tds_percent: payload.tds_percent,
      other_claim_percent: payload.other_claim_percent,
      brokerage_percent: payload.brokerage_percent,
      broker_name: payload.broker_name,
      broker_phone: payload.broker_phone,
      cheque_no: payload.cheque_no,
      bank_name: payload.bank_name,
      upi_id: payload.upi_id,
      upi_name: payload.upi_name,
      rtgs_neft_no: payload.rtgs_neft_no,
      paid_on: payload.paid_on,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// DELETE /bills/{id}/payment
pub async fn remove_payment(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<RemovePaymentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(RemovePaymentCommand {
      owner_id: owner.id,
      bill_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// POST /bills/{id}/cancel
pub async fn cancel_bill(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<CancelBillUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(CancelBillCommand {
      owner_id: owner.id,
      bill_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// GET /numbers/{document_type}/next - preview the next sequence number
pub async fn peek_next_number(
  req: HttpRequest,
  path: web::Path<String>,
  use_case: web::Data<Arc<PeekNextNumberUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(PeekNextNumberCommand {
      owner_id: owner.id,
      document_type: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}
