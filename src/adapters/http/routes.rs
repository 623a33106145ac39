use actix_web::web;
use std::sync::Arc;

use crate::application::billing::{
  CancelBillUseCase, ConvertChallanUseCase, CreateBillUseCase, CreateChallanUseCase,
  DeleteBillUseCase, DeleteChallanUseCase, GetBillDocumentUseCase, GetBillUseCase,
  GetChallanDocumentUseCase, GetChallanUseCase, ListBillsUseCase, ListChallansUseCase,
  PeekNextNumberUseCase, RecordPaymentUseCase, RemovePaymentUseCase, UpdateBillUseCase,
  UpdateChallanUseCase,
};
use crate::application::party::{
  CreatePartyUseCase, DeletePartyUseCase, GetPartyUseCase, ListPartiesUseCase, UpdatePartyUseCase,
};

use super::handlers::{bills, challans, parties};

pub fn configure_party_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreatePartyUseCase>,
  list_use_case: Arc<ListPartiesUseCase>,
  get_use_case: Arc<GetPartyUseCase>,
  update_use_case: Arc<UpdatePartyUseCase>,
  delete_use_case: Arc<DeletePartyUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route("", web::post().to(parties::create_party))
    .route("", web::get().to(parties::list_parties))
    .route("/{id}", web::get().to(parties::get_party))
    .route("/{id}", web::put().to(parties::update_party))
    .route("/{id}", web::delete().to(parties::delete_party));
}

#[allow(clippy::too_many_arguments)]
pub fn configure_bill_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateBillUseCase>,
  list_use_case: Arc<ListBillsUseCase>,
  get_use_case: Arc<GetBillUseCase>,
  document_use_case: Arc<GetBillDocumentUseCase>,
  update_use_case: Arc<UpdateBillUseCase>,
  delete_use_case: Arc<DeleteBillUseCase>,
  record_payment_use_case: Arc<RecordPaymentUseCase>,
  remove_payment_use_case: Arc<RemovePaymentUseCase>,
  cancel_use_case: Arc<CancelBillUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(document_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .app_data(web::Data::new(record_payment_use_case))
    .app_data(web::Data::new(remove_payment_use_case))
    .app_data(web::Data::new(cancel_use_case))
    .route("", web::post().to(bills::create_bill))
    .route("", web::get().to(bills::list_bills))
    .route("/{id}", web::get().to(bills::get_bill))
    .route("/{id}", web::put().to(bills::update_bill))
    .route("/{id}", web::delete().to(bills::delete_bill))
    .route("/{id}/document", web::get().to(bills::get_bill_document))
    .route("/{id}/payment", web::post().to(bills::record_payment))
    .route("/{id}/payment", web::delete().to(bills::remove_payment))
    .route("/{id}/cancel", web::post().to(bills::cancel_bill));
}

#[allow(clippy::too_many_arguments)]
pub fn configure_challan_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateChallanUseCase>,
  list_use_case: Arc<ListChallansUseCase>,
  get_use_case: Arc<GetChallanUseCase>,
  document_use_case: Arc<GetChallanDocumentUseCase>,
  update_use_case: Arc<UpdateChallanUseCase>,
  delete_use_case: Arc<DeleteChallanUseCase>,
  convert_use_case: Arc<ConvertChallanUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(document_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .app_data(web::Data::new(convert_use_case))
    .route("", web::post().to(challans::create_challan))
    .route("", web::get().to(challans::list_challans))
    .route("/{id}", web::get().to(challans::get_challan))
    .route("/{id}", web::put().to(challans::update_challan))
    .route("/{id}", web::delete().to(challans::delete_challan))
    .route("/{id}/document", web::get().to(challans::get_challan_document))
    .route("/{id}/convert", web::post().to(challans::convert_challan));
}

pub fn configure_numbering_routes(
  cfg: &mut web::ServiceConfig,
  peek_use_case: Arc<PeekNextNumberUseCase>,
) {
  cfg
    .app_data(web::Data::new(peek_use_case))
    .route(
      "/{document_type}/next",
      web::get().to(bills::peek_next_number),
    );
}
