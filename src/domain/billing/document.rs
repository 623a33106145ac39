use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::AmountBreakdown;
use super::entities::{Bill, Challan, LineItem, PartySnapshot};
use super::value_objects::{BillStatus, PaymentMethod};
use super::words::amount_in_words;

/// The issuing business as printed on documents. Loaded from configuration;
/// its state drives the interstate/intrastate tax decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerProfile {
  pub name: String,
  pub gstin: Option<String>,
  pub address: Option<String>,
  pub city: Option<String>,
  pub state: String,
  pub pincode: Option<String>,
  pub mobile_no: Option<String>,
  pub email: Option<String>,
}

/// Printable invoice payload: everything the external PDF renderer needs,
/// fully computed. The renderer owns layout; this side owns the numbers and
/// the words line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDocument {
  pub issuer: IssuerProfile,
  pub bill_no: i64,
  pub challan_no: Option<i64>,
  pub bill_date: NaiveDate,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub status: BillStatus,
  pub payment_method: PaymentMethod,
  pub total_in_words: String,
  pub round_off_display: Decimal,
}

impl BillDocument {
  pub fn assemble(bill: &Bill, issuer: &IssuerProfile) -> Self {
    Self {
      issuer: issuer.clone(),
      bill_no: bill.bill_no,
      challan_no: bill.challan_no,
      bill_date: bill.bill_date,
      party: bill.party.clone(),
      items: bill.items.clone(),
      amounts: bill.amounts.clone(),
      status: bill.status,
      payment_method: bill.payment_method,
      total_in_words: amount_in_words(bill.amounts.rounded_total),
      round_off_display: bill.amounts.round_off_display(),
    }
  }
}

/// Printable challan payload; no tax figures, no payment state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallanDocument {
  pub issuer: IssuerProfile,
  pub challan_no: i64,
  pub challan_date: NaiveDate,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub notes: Option<String>,
  pub total_in_words: String,
  pub round_off_display: Decimal,
}

impl ChallanDocument {
  pub fn assemble(challan: &Challan, issuer: &IssuerProfile) -> Self {
    Self {
      issuer: issuer.clone(),
      challan_no: challan.challan_no,
      challan_date: challan.challan_date,
      party: challan.party.clone(),
      items: challan.items.clone(),
      amounts: challan.amounts.clone(),
      notes: challan.notes.clone(),
      total_in_words: amount_in_words(challan.amounts.rounded_total),
      round_off_display: challan.amounts.round_off_display(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::entities::{BillDraft, NumberAssignment};
  use crate::domain::billing::value_objects::{
    DiscountPercent, GstRate, ItemName, Quantity, TaxJurisdiction, UnitPrice,
  };
  use crate::domain::billing::calculator::TaxContext;
  use crate::domain::party::{Party, PartyAddress, PartyName, StateName};
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  fn issuer() -> IssuerProfile {
    IssuerProfile {
      name: "Acme Mills".to_string(),
      gstin: Some("24AAACB1234C1Z5".to_string()),
      address: None,
      city: Some("Surat".to_string()),
      state: "Gujarat".to_string(),
      pincode: None,
      mobile_no: None,
      email: None,
    }
  }

  #[test]
  fn test_bill_document_words_the_rounded_total() {
    let party = Party::new(
      Uuid::new_v4(),
      PartyName::new("Sharma Textiles".to_string()).unwrap(),
      None,
      None,
      None,
      PartyAddress::new(
        None,
        None,
        None,
        None,
        None,
        StateName::new("Gujarat".to_string()).unwrap(),
        None,
      ),
    );
    let items = vec![LineItem::new(
      ItemName::new("Cotton Fabric".to_string()).unwrap(),
      None,
      Quantity::new(dec!(2)).unwrap(),
      UnitPrice::new(dec!(500)).unwrap(),
    )];
    let amounts = AmountBreakdown::compute(
      &items,
      DiscountPercent::zero(),
      TaxContext::new(GstRate::new(dec!(18)).unwrap(), TaxJurisdiction::IntraState),
    );
    let draft = BillDraft::new(
      party.created_by,
      NumberAssignment::Auto,
      None,
      NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
      (&party).into(),
      items,
      amounts,
      PaymentMethod::Cheque,
      None,
    );
    let bill = Bill::from_draft(draft, 7);

    let document = BillDocument::assemble(&bill, &issuer());
    assert_eq!(document.bill_no, 7);
    assert_eq!(document.amounts.rounded_total, dec!(1180));
    assert_eq!(
      document.total_in_words,
      "Rupees One Thousand One Hundred Eighty only"
    );
    assert_eq!(document.round_off_display, dec!(0));
  }
}
