use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::dtos::PartyRequest;
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::RequestOwner;
use crate::application::party::{
  CreatePartyCommand, CreatePartyUseCase, DeletePartyCommand, DeletePartyUseCase, GetPartyCommand,
  GetPartyUseCase, ListPartiesCommand, ListPartiesUseCase, UpdatePartyCommand, UpdatePartyUseCase,
};

// POST /parties
pub async fn create_party(
  req: HttpRequest,
  payload: web::Json<PartyRequest>,
  use_case: web::Data<Arc<CreatePartyUseCase>>,
) -> Result<HttpResponse, ApiError> {
  payload.validate()?;
  let owner = req.owner();
  let payload = payload.into_inner();

  let response = use_case
    .execute(CreatePartyCommand {
      owner_id: owner.id,
      company_name: payload.company_name,
      gstin: payload.gstin,
      mobile_no: payload.mobile_no,
      email: payload.email,
      plot_house_no: payload.plot_house_no,
      line1: payload.line1,
      area: payload.area,
      landmark: payload.landmark,
      city: payload.city,
      state: payload.state,
      pincode: payload.pincode,
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}

// GET /parties
pub async fn list_parties(
  req: HttpRequest,
  use_case: web::Data<Arc<ListPartiesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(ListPartiesCommand { owner_id: owner.id })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// GET /parties/{id}
pub async fn get_party(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetPartyUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  let response = use_case
    .execute(GetPartyCommand {
      owner_id: owner.id,
      party_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// PUT /parties/{id}
pub async fn update_party(
  req: HttpRequest,
  path: web::Path<Uuid>,
  payload: web::Json<PartyRequest>,
  use_case: web::Data<Arc<UpdatePartyUseCase>>,
) -> Result<HttpResponse, ApiError> {
  payload.validate()?;
  let owner = req.owner();
  let payload = payload.into_inner();

  let response = use_case
    .execute(UpdatePartyCommand {
      owner_id: owner.id,
      party_id: path.into_inner(),
      company_name: payload.company_name,
      gstin: payload.gstin,
      mobile_no: payload.mobile_no,
      email: payload.email,
      plot_house_no: payload.plot_house_no,
      line1: payload.line1,
      area: payload.area,
      landmark: payload.landmark,
      city: payload.city,
      state: payload.state,
      pincode: payload.pincode,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

// DELETE /parties/{id}
pub async fn delete_party(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeletePartyUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let owner = req.owner();

  use_case
    .execute(DeletePartyCommand {
      owner_id: owner.id,
      party_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}
