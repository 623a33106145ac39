use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::dtos::{ChallanListQuery, CreateChallanRequest, UpdateChallanRequest};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::RequestOwner;
use crate::application::billing::{
  ConvertChallanCommand, ConvertChallanUseCase, CreateChallanCommand, CreateChallanUseCase,
  DeleteChallanCommand, DeleteChallanUseCase, GetChallanCommand, GetChallanDocumentCommand,
  GetChallanDocumentUseCase, GetChallanUseCase, ListChallansCommand, ListChallansUseCase,
  UpdateChallanCommand, UpdateChallanUseCase,
};

use super::bills::line_items;

// POST /challans
pub async fn create_challan(
  req: HttpRequest,
  payload: web::Json<CreateChallanRequest>,
  use_case: web::Data<Arc<CreateChallanUseCase>>,
) -> Result<HttpResponse, ApiError> {
  payload.validate()?;
  let owner = req.owner();
  let payload = payload.into_inner();

  let response = use_case
    .execute(CreateChallanCommand {
      owner_id: owner.id,
      challan_no: payload.challan_no,
      challan_date: payload.challan_date,
      party_id: payload.party_id,
      items: line_items(payload.items),
      discount_percent: payload.discount_percent,
      notes: payload.notes,
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}

// GET /challans
pub async fn list_challans(
  req: HttpRequest,
  query: web::Query<ChallanListQuery>,
  use_case: web::Data<Arc<ListChallansUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(ListChallansCommand {
      owner_id: owner.id,
      party_id: query.party_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// GET /challans/{id}
pub async fn get_challan(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetChallanUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(GetChallanCommand {
      owner_id: owner.id,
      challan_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// GET /challans/{id}/document - printable payload for the PDF renderer
pub async fn get_challan_document(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetChallanDocumentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let document = use_case
    .execute(GetChallanDocumentCommand {
      owner_id: owner.id,
      challan_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(document))
}

// PUT /challans/{id}
pub async fn update_challan(
  req: HttpRequest,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateChallanRequest>,
  use_case: web::Data<Arc<UpdateChallanUseCase>>,
) -> Result<HttpResponse, ApiError> {
  payload.validate()?;
  let owner = req.owner();
  let payload = payload.into_inner();

  let response = use_case
    .execute(UpdateChallanCommand {
      owner_id: owner.id,
      challan_id: path.into_inner(),
      challan_date: payload.challan_date,
      party_id: payload.party_id,
      items: line_items(payload.items),
      discount_percent: payload.discount_percent,
      notes: payload.notes,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// DELETE /challans/{id}
pub async fn delete_challan(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteChallanUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  use_case
    .execute(DeleteChallanCommand {
      owner_id: owner.id,
      challan_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}

// POST /challans/{id}/convert - raise a tax invoice from this challan
pub async fn convert_challan(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ConvertChallanUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(ConvertChallanCommand {
      owner_id: owner.id,
      challan_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}
