use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::party::{Party, PartyAddress};

use super::calculator::AmountBreakdown;
use super::errors::BillingEntityError;
use super::value_objects::{
  BillStatus, HsnCode, ItemName, PaymentMethod, Percent, Quantity, UnitPrice,
};

// Line Item - embedded in bills and challans, never a standalone record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
  pub name: ItemName,
  pub hsn_code: Option<HsnCode>,
  pub quantity: Quantity,
  pub unit_price: UnitPrice,
}

impl LineItem {
  pub fn new(
    name: ItemName,
    hsn_code: Option<HsnCode>,
    quantity: Quantity,
    unit_price: UnitPrice,
  ) -> Self {
    Self {
      name,
      hsn_code,
      quantity,
      unit_price,
    }
  }

  pub fn amount(&self) -> Decimal {
    self.quantity.value() * self.unit_price.value()
  }
}

// Party Snapshot - a full copy of the party frozen into the document at
// creation time. Invoices are immutable historical records: later edits to
// the party must not rewrite what was printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySnapshot {
  pub party_id: Uuid,
  pub company_name: String,
  pub gstin: Option<String>,
  pub mobile_no: Option<String>,
  pub email: Option<String>,
  pub address: PartyAddress,
}

impl From<&Party> for PartySnapshot {
  fn from(party: &Party) -> Self {
    Self {
      party_id: party.id,
      company_name: party.company_name.value().to_string(),
      gstin: party.gstin.as_ref().map(|g| g.value().to_string()),
      mobile_no: party.mobile_no.as_ref().map(|m| m.value().to_string()),
      email: party.email.as_ref().map(|e| e.value().to_string()),
      address: party.address.clone(),
    }
  }
}

impl PartySnapshot {
  pub fn state(&self) -> &str {
    self.address.state.value()
  }
}

/// Validated input for recording a payment against a bill.
#[derive(Debug, Clone)]
pub struct PaymentData {
  pub method: PaymentMethod,
  pub amount: Decimal,
  pub tds_percent: Percent,
  pub other_claim_percent: Percent,
  pub brokerage_percent: Percent,
  pub broker_name: Option<String>,
  pub broker_phone: Option<String>,
  pub cheque_no: Option<String>,
  pub bank_name: Option<String>,
  pub upi_id: Option<String>,
  pub upi_name: Option<String>,
  pub rtgs_neft_no: Option<String>,
  pub paid_on: NaiveDate,
}

// Payment Details - settlement record embedded in a paid bill. Percentage
// amounts are computed once against the bill's taxable amount and frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
  pub method: PaymentMethod,
  pub amount: Decimal,
  pub taxable_amount: Decimal,
  pub tds_percent: Decimal,
  pub tds_amount: Decimal,
  pub other_claim_percent: Decimal,
  pub other_claim_amount: Decimal,
  pub brokerage_percent: Decimal,
  pub brokerage_amount: Decimal,
  pub broker_name: Option<String>,
  pub broker_phone: Option<String>,
  pub cheque_no: Option<String>,
  pub bank_name: Option<String>,
  pub upi_id: Option<String>,
  pub upi_name: Option<String>,
  pub rtgs_neft_no: Option<String>,
  pub paid_on: NaiveDate,
}

impl PaymentDetails {
  /// Builds the settlement record, deriving TDS/claim/brokerage amounts
  /// from the bill's taxable amount and checking the method-specific
  /// reference fields are present.
  pub fn settle(data: PaymentData, taxable_amount: Decimal) -> Result<Self, BillingEntityError> {
    let missing = |field: &'static str| BillingEntityError::PaymentFieldMissing {
      method: data.method,
      field,
    };

    match data.method {
      PaymentMethod::Cheque => {
        if data.cheque_no.as_deref().unwrap_or("").trim().is_empty() {
          return Err(missing("cheque_no"));
        }
      }
      PaymentMethod::Upi => {
        if data.upi_id.as_deref().unwrap_or("").trim().is_empty() {
          return Err(missing("upi_id"));
        }
      }
      PaymentMethod::NetBanking => {
        if data.rtgs_neft_no.as_deref().unwrap_or("").trim().is_empty() {
          return Err(missing("rtgs_neft_no"));
        }
      }
      PaymentMethod::Cash => {}
    }

    Ok(Self {
      method: data.method,
      amount: data.amount,
      taxable_amount,
      tds_percent: data.tds_percent.value(),
      tds_amount: data.tds_percent.of(taxable_amount),
      other_claim_percent: data.other_claim_percent.value(),
      other_claim_amount: data.other_claim_percent.of(taxable_amount),
      brokerage_percent: data.brokerage_percent.value(),
      brokerage_amount: data.brokerage_percent.of(taxable_amount),
      broker_name: data.broker_name,
      broker_phone: data.broker_phone,
      cheque_no: data.cheque_no,
      bank_name: data.bank_name,
      upi_id: data.upi_id,
      upi_name: data.upi_name,
      rtgs_neft_no: data.rtgs_neft_no,
      paid_on: data.paid_on,
    })
  }
}

/// How the document number is assigned at creation: drawn from the owner's
/// counter, or supplied explicitly (manual entry, checked for collisions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberAssignment {
  Auto,
  Explicit(i64),
}

// Bill (tax invoice). Amounts are frozen at creation; edits recompute and
// replace the whole breakdown, never patch individual figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
  pub id: Uuid,
  pub bill_no: i64,
  pub challan_no: Option<i64>,
  pub bill_date: NaiveDate,
  pub party_id: Uuid,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub status: BillStatus,
  pub payment_method: PaymentMethod,
  pub payment: Option<PaymentDetails>,
  pub notes: Option<String>,
  pub created_by: Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// An unpersisted bill. The number is provisional until the repository
/// commits it together with the counter in one transaction.
#[derive(Debug, Clone)]
pub struct BillDraft {
  pub id: Uuid,
  pub number: NumberAssignment,
  pub challan_no: Option<i64>,
  pub bill_date: NaiveDate,
  pub party_id: Uuid,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub payment_method: PaymentMethod,
  pub notes: Option<String>,
  pub created_by: Uuid,
  pub created_at: DateTime<Utc>,
}

impl BillDraft {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    created_by: Uuid,
    number: NumberAssignment,
    challan_no: Option<i64>,
    bill_date: NaiveDate,
    party: PartySnapshot,
    items: Vec<LineItem>,
    amounts: AmountBreakdown,
    payment_method: PaymentMethod,
    notes: Option<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      number,
      challan_no,
      bill_date,
      party_id: party.party_id,
      party,
      items,
      amounts,
      payment_method,
      notes,
      created_by,
      created_at: Utc::now(),
    }
  }
}

impl Bill {
  /// Materializes the draft with its committed number. New bills always
  /// start out pending and unpaid.
  pub fn from_draft(draft: BillDraft, bill_no: i64) -> Self {
    Self {
      id: draft.id,
      bill_no,
      challan_no: draft.challan_no,
      bill_date: draft.bill_date,
      party_id: draft.party_id,
      party: draft.party,
      items: draft.items,
      amounts: draft.amounts,
      status: BillStatus::Pending,
      payment_method: draft.payment_method,
      payment: None,
      notes: draft.notes,
      created_by: draft.created_by,
      created_at: draft.created_at,
      updated_at: draft.created_at,
    }
  }

  pub fn is_editable(&self) -> bool {
    self.status == BillStatus::Pending
  }

  /// Replaces the bill's contents with a freshly recomputed breakdown.
  /// Only pending bills may be edited; paid and cancelled bills are frozen.
  pub fn update_contents(
    &mut self,
    bill_date: NaiveDate,
    party: PartySnapshot,
    items: Vec<LineItem>,
    amounts: AmountBreakdown,
    payment_method: PaymentMethod,
    notes: Option<String>,
  ) -> Result<(), BillingEntityError> {
    if !self.is_editable() {
      return Err(BillingEntityError::NotEditable {
        status: self.status,
      });
    }
    self.bill_date = bill_date;
    self.party_id = party.party_id;
    self.party = party;
    self.items = items;
    self.amounts = amounts;
    self.payment_method = payment_method;
    self.notes = notes;
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn record_payment(&mut self, payment: PaymentDetails) -> Result<(), BillingEntityError> {
    self.transition(BillStatus::Paid)?;
    self.payment_method = payment.method;
    self.payment = Some(payment);
    Ok(())
  }

  pub fn remove_payment(&mut self) -> Result<(), BillingEntityError> {
    if self.payment.is_none() {
      return Err(BillingEntityError::NoPaymentRecorded);
    }
    self.transition(BillStatus::Pending)?;
    self.payment = None;
    Ok(())
  }

  pub fn cancel(&mut self) -> Result<(), BillingEntityError> {
    self.transition(BillStatus::Cancelled)
  }

  fn transition(&mut self, new_status: BillStatus) -> Result<(), BillingEntityError> {
    if !self.status.can_transition_to(new_status) {
      return Err(BillingEntityError::InvalidStatusTransition {
        from: self.status,
        to: new_status,
      });
    }
    self.status = new_status;
    self.updated_at = Utc::now();
    Ok(())
  }
}

// Challan (delivery note). Carries the same amount pipeline without tax,
// and no payment lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challan {
  pub id: Uuid,
  pub challan_no: i64,
  pub challan_date: NaiveDate,
  pub party_id: Uuid,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub notes: Option<String>,
  pub created_by: Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ChallanDraft {
  pub id: Uuid,
  pub number: NumberAssignment,
  pub challan_date: NaiveDate,
  pub party_id: Uuid,
  pub party: PartySnapshot,
  pub items: Vec<LineItem>,
  pub amounts: AmountBreakdown,
  pub notes: Option<String>,
  pub created_by: Uuid,
  pub created_at: DateTime<Utc>,
}

impl ChallanDraft {
  pub fn new(
    created_by: Uuid,
    number: NumberAssignment,
    challan_date: NaiveDate,
    party: PartySnapshot,
    items: Vec<LineItem>,
    amounts: AmountBreakdown,
    notes: Option<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      number,
      challan_date,
      party_id: party.party_id,
      party,
      items,
      amounts,
      notes,
      created_by,
      created_at: Utc::now(),
    }
  }
}

impl Challan {
  pub fn from_draft(draft: ChallanDraft, challan_no: i64) -> Self {
    Self {
      id: draft.id,
      challan_no,
      challan_date: draft.challan_date,
      party_id: draft.party_id,
      party: draft.party,
      items: draft.items,
      amounts: draft.amounts,
      notes: draft.notes,
      created_by: draft.created_by,
      created_at: draft.created_at,
      updated_at: draft.created_at,
    }
  }

  pub fn update_contents(
    &mut self,
    challan_date: NaiveDate,
    party: PartySnapshot,
    items: Vec<LineItem>,
    amounts: AmountBreakdown,
    notes: Option<String>,
  ) {
    self.challan_date = challan_date;
    self.party_id = party.party_id;
    self.party = party;
    self.items = items;
    self.amounts = amounts;
    self.notes = notes;
    self.updated_at = Utc::now();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::calculator::{AmountBreakdown, TaxContext};
  use crate::domain::billing::value_objects::{DiscountPercent, GstRate, TaxJurisdiction};
  use crate::domain::party::{PartyName, StateName};
  use rust_decimal_macros::dec;

  fn sample_party() -> Party {
    Party::new(
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
        Some("Surat".to_string()),
        StateName::new("Gujarat".to_string()).unwrap(),
        None,
      ),
    )
  }

  fn sample_items() -> Vec<LineItem> {
    vec![LineItem::new(
      ItemName::new("Cotton Fabric".to_string()).unwrap(),
      None,
      Quantity::new(dec!(2)).unwrap(),
      UnitPrice::new(dec!(500)).unwrap(),
    )]
  }

  fn sample_bill() -> Bill {
    let party = sample_party();
    let items = sample_items();
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
      PartySnapshot::from(&party),
      items,
      amounts,
      PaymentMethod::Cheque,
      None,
    );
    Bill::from_draft(draft, 1)
  }

  fn sample_payment(taxable: Decimal) -> PaymentDetails {
    PaymentDetails::settle(
      PaymentData {
        method: PaymentMethod::Cheque,
        amount: dec!(1180),
        tds_percent: Percent::new(dec!(2)).unwrap(),
        other_claim_percent: Percent::zero(),
        brokerage_percent: Percent::zero(),
        broker_name: None,
        broker_phone: None,
        cheque_no: Some("004512".to_string()),
        bank_name: Some("SBI".to_string()),
        upi_id: None,
        upi_name: None,
        rtgs_neft_no: None,
        paid_on: NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
      },
      taxable,
    )
    .unwrap()
  }

  #[test]
  fn test_snapshot_freezes_party() {
    let mut party = sample_party();
    let snapshot = PartySnapshot::from(&party);
    party.update(
      PartyName::new("Renamed Mills".to_string()).unwrap(),
      None,
      None,
      None,
      party.address.clone(),
    );
    assert_eq!(snapshot.company_name, "Sharma Textiles");
    assert_eq!(snapshot.state(), "Gujarat");
  }

  #[test]
  fn test_bill_starts_pending() {
    let bill = sample_bill();
    assert_eq!(bill.status, BillStatus::Pending);
    assert_eq!(bill.bill_no, 1);
    assert!(bill.payment.is_none());
    assert!(bill.is_editable());
  }

  #[test]
  fn test_payment_settlement_arithmetic() {
    let payment = sample_payment(dec!(1000));
    assert_eq!(payment.tds_amount, dec!(20));
    assert_eq!(payment.other_claim_amount, dec!(0));
    assert_eq!(payment.brokerage_amount, dec!(0));
  }

  #[test]
  fn test_payment_requires_method_reference() {
    let data = PaymentData {
      method: PaymentMethod::Upi,
      amount: dec!(500),
      tds_percent: Percent::zero(),
      other_claim_percent: Percent::zero(),
      brokerage_percent: Percent::zero(),
      broker_name: None,
      broker_phone: None,
      cheque_no: None,
      bank_name: None,
      upi_id: None,
      upi_name: None,
      rtgs_neft_no: None,
      paid_on: NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
    };
    assert!(matches!(
      PaymentDetails::settle(data, dec!(500)),
      Err(BillingEntityError::PaymentFieldMissing { field: "upi_id", .. })
    ));
  }

  #[test]
  fn test_record_and_remove_payment() {
    let mut bill = sample_bill();
    let payment = sample_payment(bill.amounts.taxable_amount);

    bill.record_payment(payment.clone()).unwrap();
    assert_eq!(bill.status, BillStatus::Paid);
    assert!(!bill.is_editable());

    // paying twice is an invalid transition
    assert!(bill.record_payment(payment).is_err());

    bill.remove_payment().unwrap();
    assert_eq!(bill.status, BillStatus::Pending);
    assert!(bill.payment.is_none());

    assert!(matches!(
      bill.remove_payment(),
      Err(BillingEntityError::NoPaymentRecorded)
    ));
  }

  #[test]
  fn test_cancelled_is_terminal() {
    let mut bill = sample_bill();
    bill.cancel().unwrap();
    assert_eq!(bill.status, BillStatus::Cancelled);

    let payment = sample_payment(bill.amounts.taxable_amount);
    assert!(bill.record_payment(payment).is_err());
    assert!(bill.cancel().is_err());
  }

  #[test]
  fn test_paid_bill_rejects_edit() {
    let mut bill = sample_bill();
    let payment = sample_payment(bill.amounts.taxable_amount);
    bill.record_payment(payment).unwrap();

    let party = sample_party();
    let items = sample_items();
    let amounts = AmountBreakdown::compute_untaxed(&items, DiscountPercent::zero());
    let result = bill.update_contents(
      NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
      PartySnapshot::from(&party),
      items,
      amounts,
      PaymentMethod::Cash,
      None,
    );
    assert!(matches!(
      result,
      Err(BillingEntityError::NotEditable { .. })
    ));
  }
}
