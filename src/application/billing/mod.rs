pub mod cancel_bill;
pub mod convert_challan;
pub mod create_bill;
pub mod create_challan;
pub mod delete_bill;
pub mod delete_challan;
pub mod get_bill;
pub mod get_bill_document;
pub mod get_challan;
pub mod get_challan_document;
pub mod list_bills;
pub mod list_challans;
pub mod peek_next_number;
pub mod record_payment;
pub mod remove_payment;
pub mod update_bill;
pub mod update_challan;

pub use cancel_bill::{CancelBillCommand, CancelBillResponse, CancelBillUseCase};
pub use convert_challan::{ConvertChallanCommand, ConvertChallanResponse, ConvertChallanUseCase};
pub use create_bill::{CreateBillCommand, CreateBillResponse, CreateBillUseCase, LineItemDto};
pub use create_challan::{CreateChallanCommand, CreateChallanResponse, CreateChallanUseCase};
pub use delete_bill::{DeleteBillCommand, DeleteBillUseCase};
pub use delete_challan::{DeleteChallanCommand, DeleteChallanUseCase};
pub use get_bill::{BillDetailsDto, GetBillCommand, GetBillUseCase};
pub use get_bill_document::{GetBillDocumentCommand, GetBillDocumentUseCase};
pub use get_challan::{ChallanDetailsDto, GetChallanCommand, GetChallanUseCase};
pub use get_challan_document::{GetChallanDocumentCommand, GetChallanDocumentUseCase};
pub use list_bills::{BillSummaryDto, ListBillsCommand, ListBillsResponse, ListBillsUseCase};
pub use list_challans::{
  ChallanSummaryDto, ListChallansCommand, ListChallansResponse, ListChallansUseCase,
};
pub use peek_next_number::{
  PeekNextNumberCommand, PeekNextNumberResponse, PeekNextNumberUseCase,
};
pub use record_payment::{RecordPaymentCommand, RecordPaymentResponse, RecordPaymentUseCase};
pub use remove_payment::{RemovePaymentCommand, RemovePaymentResponse, RemovePaymentUseCase};
pub use update_bill::{UpdateBillCommand, UpdateBillResponse, UpdateBillUseCase};
pub use update_challan::{UpdateChallanCommand, UpdateChallanResponse, UpdateChallanUseCase};
