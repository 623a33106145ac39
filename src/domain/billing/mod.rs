pub mod calculator;
pub mod document;
pub mod entities;
pub mod errors;
pub mod parse;
pub mod ports;
pub mod services;
pub mod value_objects;
pub mod words;

pub use calculator::{AmountBreakdown, TaxContext, round_half_up};
pub use document::{BillDocument, ChallanDocument, IssuerProfile};
pub use entities::{
  Bill, BillDraft, Challan, ChallanDraft, LineItem, NumberAssignment, PartySnapshot, PaymentData,
  PaymentDetails,
};
pub use errors::{BillingEntityError, BillingError};
pub use ports::{BillFilter, BillRepository, ChallanRepository, CounterStore, NextNumber};
pub use services::{
  BillData, BillUpdateData, BillingService, BillingServiceConfig, ChallanData, ChallanUpdateData,
};
pub use value_objects::{
  BillStatus, DiscountPercent, DocumentType, GstRate, HsnCode, ItemName, PaymentMethod, Percent,
  Quantity, TaxJurisdiction, UnitPrice, ValueObjectError,
};
pub use words::amount_in_words;
