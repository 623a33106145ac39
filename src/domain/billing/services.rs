use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::party::{Party, ports::PartyRepository};

use super::calculator::{AmountBreakdown, TaxContext};
use super::document::{BillDocument, ChallanDocument, IssuerProfile};
use super::entities::{
  Bill, BillDraft, Challan, ChallanDraft, LineItem, NumberAssignment, PartySnapshot, PaymentData,
  PaymentDetails,
};
use super::errors::BillingError;
use super::ports::{BillFilter, BillRepository, ChallanRepository, CounterStore, NextNumber};
use super::value_objects::{
  DiscountPercent, DocumentType, GstRate, PaymentMethod, TaxJurisdiction,
};

/// Bill creation data, already validated into value objects.
pub struct BillData {
  pub number: NumberAssignment,
  pub bill_date: NaiveDate,
  pub party_id: Uuid,
  pub challan_no: Option<i64>,
  pub items: Vec<LineItem>,
  pub discount: DiscountPercent,
  pub gst_rate: GstRate,
  pub payment_method: PaymentMethod,
  pub notes: Option<String>,
}

/// Bill update data. The bill number is document identity and never changes
/// after creation; edits recompute everything else.
pub struct BillUpdateData {
  pub bill_date: NaiveDate,
  pub party_id: Uuid,
  pub items: Vec<LineItem>,
  pub discount: DiscountPercent,
  pub gst_rate: GstRate,
  pub payment_method: PaymentMethod,
  pub notes: Option<String>,
}

pub struct ChallanData {
  pub number: NumberAssignment,
  pub challan_date: NaiveDate,
  pub party_id: Uuid,
  pub items: Vec<LineItem>,
  pub discount: DiscountPercent,
  pub notes: Option<String>,
}

pub struct ChallanUpdateData {
  pub challan_date: NaiveDate,
  pub party_id: Uuid,
  pub items: Vec<LineItem>,
  pub discount: DiscountPercent,
  pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BillingServiceConfig {
  pub issuer: IssuerProfile,
  /// Rate applied when converting a challan, which carries no tax of its own.
  pub default_gst_rate: GstRate,
  /// Upper bound on the counter-allocating create transaction. On expiry the
  /// transaction is dropped, releasing the counter row untouched.
  pub allocation_timeout: Duration,
}

pub struct BillingService {
  bill_repo: Arc<dyn BillRepository>,
  challan_repo: Arc<dyn ChallanRepository>,
  party_repo: Arc<dyn PartyRepository>,
  counter_store: Arc<dyn CounterStore>,
  config: BillingServiceConfig,
}

impl BillingService {
  pub fn new(
    bill_repo: Arc<dyn BillRepository>,
    challan_repo: Arc<dyn ChallanRepository>,
    party_repo: Arc<dyn PartyRepository>,
    counter_store: Arc<dyn CounterStore>,
    config: BillingServiceConfig,
  ) -> Self {
    Self {
      bill_repo,
      challan_repo,
      party_repo,
      counter_store,
      config,
    }
  }

  pub fn issuer(&self) -> &IssuerProfile {
    &self.config.issuer
  }

  // Bill operations

  pub async fn create_bill(&self, owner_id: Uuid, data: BillData) -> Result<Bill, BillingError> {
    let party = self.load_party(owner_id, data.party_id).await?;
    let snapshot = PartySnapshot::from(&party);

    let tax = TaxContext::new(
      data.gst_rate,
      TaxJurisdiction::from_states(snapshot.state(), &self.config.issuer.state),
    );
    let amounts = AmountBreakdown::compute(&data.items, data.discount, tax);

    let draft = BillDraft::new(
      owner_id,
      data.number,
      data.challan_no,
      data.bill_date,
      snapshot,
      data.items,
      amounts,
      data.payment_method,
      data.notes,
    );

    self.commit_bill(draft).await
  }

  pub async fn update_bill(
    &self,
    owner_id: Uuid,
    bill_id: Uuid,
    data: BillUpdateData,
  ) -> Result<Bill, BillingError> {
    let mut bill = self.load_bill(owner_id, bill_id).await?;
    let party = self.load_party(owner_id, data.party_id).await?;
    let snapshot = PartySnapshot::from(&party);

    let tax = TaxContext::new(
      data.gst_rate,
      TaxJurisdiction::from_states(snapshot.state(), &self.config.issuer.state),
    );
    let amounts = AmountBreakdown::compute(&data.items, data.discount, tax);

    bill.update_contents(
      data.bill_date,
      snapshot,
      data.items,
      amounts,
      data.payment_method,
      data.notes,
    )?;

    self.bill_repo.update(bill).await
  }

  pub async fn get_bill(&self, owner_id: Uuid, bill_id: Uuid) -> Result<Bill, BillingError> {
    self.load_bill(owner_id, bill_id).await
  }

  pub async fn list_bills(
    &self,
    owner_id: Uuid,
    filter: BillFilter,
  ) -> Result<Vec<Bill>, BillingError> {
    self.bill_repo.find_by_owner(owner_id, filter).await
  }

  pub async fn delete_bill(&self, owner_id: Uuid, bill_id: Uuid) -> Result<(), BillingError> {
    // The counter is deliberately left alone: numbers are never reused,
    // even when their document goes away.
    self.load_bill(owner_id, bill_id).await?;
    self.bill_repo.delete(owner_id, bill_id).await
  }

  pub async fn record_payment(
    &self,
    owner_id: Uuid,
    bill_id: Uuid,
    data: PaymentData,
  ) -> Result<Bill, BillingError> {
    let mut bill = self.load_bill(owner_id, bill_id).await?;
    let payment = PaymentDetails::settle(data, bill.amounts.taxable_amount)?;
    bill.record_payment(payment)?;
    self.bill_repo.update(bill).await
  }

  pub async fn remove_payment(&self, owner_id: Uuid, bill_id: Uuid) -> Result<Bill, BillingError> {
    let mut bill = self.load_bill(owner_id, bill_id).await?;
    bill.remove_payment()?;
    self.bill_repo.update(bill).await
  }

  pub async fn cancel_bill(&self, owner_id: Uuid, bill_id: Uuid) -> Result<Bill, BillingError> {
    let mut bill = self.load_bill(owner_id, bill_id).await?;
    bill.cancel()?;
    self.bill_repo.update(bill).await
  }

  pub async fn bill_document(
    &self,
    owner_id: Uuid,
    bill_id: Uuid,
  ) -> Result<BillDocument, BillingError> {
    let bill = self.load_bill(owner_id, bill_id).await?;
    Ok(BillDocument::assemble(&bill, &self.config.issuer))
  }

  // Challan operations

  pub async fn create_challan(
    &self,
    owner_id: Uuid,
    data: ChallanData,
  ) -> Result<Challan, BillingError> {
    let party = self.load_party(owner_id, data.party_id).await?;
    let amounts = AmountBreakdown::compute_untaxed(&data.items, data.discount);

    let draft = ChallanDraft::new(
      owner_id,
      data.number,
      data.challan_date,
      PartySnapshot::from(&party),
      data.items,
      amounts,
      data.notes,
    );

    self.commit_challan(draft).await
  }

  pub async fn update_challan(
    &self,
    owner_id: Uuid,
    challan_id: Uuid,
    data: ChallanUpdateData,
  ) -> Result<Challan, BillingError> {
    let mut challan = self.load_challan(owner_id, challan_id).await?;
    let party = self.load_party(owner_id, data.party_id).await?;
    let amounts = AmountBreakdown::compute_untaxed(&data.items, data.discount);

    challan.update_contents(
      data.challan_date,
      PartySnapshot::from(&party),
      data.items,
      amounts,
      data.notes,
    );

    self.challan_repo.update(challan).await
  }

  pub async fn get_challan(
    &self,
    owner_id: Uuid,
    challan_id: Uuid,
  ) -> Result<Challan, BillingError> {
    self.load_challan(owner_id, challan_id).await
  }

  pub async fn list_challans(
    &self,
    owner_id: Uuid,
    party_id: Option<Uuid>,
  ) -> Result<Vec<Challan>, BillingError> {
    self.challan_repo.find_by_owner(owner_id, party_id).await
  }

  pub async fn delete_challan(&self, owner_id: Uuid, challan_id: Uuid) -> Result<(), BillingError> {
    self.load_challan(owner_id, challan_id).await?;
    self.challan_repo.delete(owner_id, challan_id).await
  }

  pub async fn challan_document(
    &self,
    owner_id: Uuid,
    challan_id: Uuid,
  ) -> Result<ChallanDocument, BillingError> {
    let challan = self.load_challan(owner_id, challan_id).await?;
    Ok(ChallanDocument::assemble(&challan, &self.config.issuer))
  }

  /// Converts a challan into a tax invoice.
  ///
  /// Amounts are re-derived from the challan's items and discount — a
  /// challan total never had tax applied, so copying it would be wrong. The
  /// configured default GST rate is applied under the same interstate rule
  /// as direct bill creation, tested against the party SNAPSHOT on the
  /// challan. The source challan is read, never written.
  pub async fn convert_challan(
    &self,
    owner_id: Uuid,
    challan_id: Uuid,
  ) -> Result<Bill, BillingError> {
    let challan = self.load_challan(owner_id, challan_id).await?;

    let discount = DiscountPercent::new(challan.amounts.discount_percent)?;
    let tax = TaxContext::new(
      self.config.default_gst_rate,
      TaxJurisdiction::from_states(challan.party.state(), &self.config.issuer.state),
    );
    let amounts = AmountBreakdown::compute(&challan.items, discount, tax);

    // Challan-originated trade settles by cheque unless edited later.
    let draft = BillDraft::new(
      owner_id,
      NumberAssignment::Auto,
      Some(challan.challan_no),
      Utc::now().date_naive(),
      challan.party.clone(),
      challan.items.clone(),
      amounts,
      PaymentMethod::Cheque,
      challan.notes.clone(),
    );

    self.commit_bill(draft).await
  }

  // Numbering

  /// Non-reserving preview of the next number, for pre-filling forms. A
  /// `fallback` result means the counter could not be read and 1 was
  /// assumed; the caller surfaces it as a warning.
  pub async fn peek_next_number(
    &self,
    owner_id: Uuid,
    document_type: DocumentType,
  ) -> NextNumber {
    let next = self.counter_store.peek_next(owner_id, document_type).await;
    if next.fallback {
      tracing::warn!(
        owner_id = %owner_id,
        document_type = %document_type,
        "counter read failed, assuming sequence starts at 1"
      );
    }
    next
  }

  // Helpers

  async fn commit_bill(&self, draft: BillDraft) -> Result<Bill, BillingError> {
    tokio::time::timeout(self.config.allocation_timeout, self.bill_repo.create(draft))
      .await
      .map_err(|_| BillingError::AllocationTimeout {
        document_type: DocumentType::Bill,
      })?
  }

  async fn commit_challan(&self, draft: ChallanDraft) -> Result<Challan, BillingError> {
    tokio::time::timeout(
      self.config.allocation_timeout,
      self.challan_repo.create(draft),
    )
    .await
    .map_err(|_| BillingError::AllocationTimeout {
      document_type: DocumentType::Challan,
    })?
  }

  async fn load_party(&self, owner_id: Uuid, party_id: Uuid) -> Result<Party, BillingError> {
    self
      .party_repo
      .find_by_id(owner_id, party_id)
      .await
      .map_err(|e| BillingError::Internal(format!("Failed to load party: {}", e)))?
      .ok_or(BillingError::PartyNotFound(party_id))
  }

  async fn load_bill(&self, owner_id: Uuid, bill_id: Uuid) -> Result<Bill, BillingError> {
    self
      .bill_repo
      .find_by_id(owner_id, bill_id)
      .await?
      .ok_or(BillingError::BillNotFound(bill_id))
  }

  async fn load_challan(&self, owner_id: Uuid, challan_id: Uuid) -> Result<Challan, BillingError> {
    self
      .challan_repo
      .find_by_id(owner_id, challan_id)
      .await?
      .ok_or(BillingError::ChallanNotFound(challan_id))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::value_objects::{
    BillStatus, HsnCode, ItemName, Percent, Quantity, UnitPrice,
  };
  use crate::domain::party::{PartyAddress, PartyError, PartyName, StateName};
  use async_trait::async_trait;
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;
  use std::collections::HashMap;
  use std::sync::Mutex;

  // In-memory ports. The document repos allocate under one lock, mirroring
  // the transactional counter+insert guarantee of the real store.

  #[derive(Default)]
  struct Store {
    counters: HashMap<(Uuid, DocumentType), i64>,
    bills: HashMap<Uuid, Bill>,
    challans: HashMap<Uuid, Challan>,
    parties: HashMap<Uuid, Party>,
  }

  #[derive(Default)]
  struct InMemory {
    store: Mutex<Store>,
  }

  impl InMemory {
    fn allocate(
      store: &mut Store,
      owner_id: Uuid,
      document_type: DocumentType,
      number: NumberAssignment,
      taken: impl Fn(&Store, i64) -> bool,
    ) -> Result<i64, BillingError> {
      match number {
        NumberAssignment::Auto => {
          let counter = store.counters.entry((owner_id, document_type)).or_insert(0);
          *counter += 1;
          Ok(*counter)
        }
        NumberAssignment::Explicit(requested) => {
          if taken(store, requested) {
            return Err(BillingError::NumberAlreadyExists {
              document_type,
              number: requested,
            });
          }
          let counter = store.counters.entry((owner_id, document_type)).or_insert(0);
          *counter = (*counter).max(requested);
          Ok(requested)
        }
      }
    }
  }

  #[async_trait]
  impl BillRepository for InMemory {
    async fn create(&self, draft: BillDraft) -> Result<Bill, BillingError> {
      let mut store = self.store.lock().unwrap();
      let owner_id = draft.created_by;
      let number = Self::allocate(
        &mut store,
        owner_id,
        DocumentType::Bill,
        draft.number,
        |store, n| {
          store
            .bills
            .values()
            .any(|b| b.created_by == owner_id && b.bill_no == n)
        },
      )?;
      let bill = Bill::from_draft(draft, number);
      store.bills.insert(bill.id, bill.clone());
      Ok(bill)
    }

    async fn update(&self, bill: Bill) -> Result<Bill, BillingError> {
      let mut store = self.store.lock().unwrap();
      store.bills.insert(bill.id, bill.clone());
      Ok(bill)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Bill>, BillingError> {
      let store = self.store.lock().unwrap();
      Ok(
        store
          .bills
          .get(&id)
          .filter(|b| b.created_by == owner_id)
          .cloned(),
      )
    }

    async fn find_by_owner(
      &self,
      owner_id: Uuid,
      filter: BillFilter,
    ) -> Result<Vec<Bill>, BillingError> {
      let store = self.store.lock().unwrap();
      let mut bills: Vec<Bill> = store
        .bills
        .values()
        .filter(|b| b.created_by == owner_id)
        .filter(|b| filter.party_id.is_none_or(|p| b.party_id == p))
        .filter(|b| filter.status.is_none_or(|s| b.status == s))
        .cloned()
        .collect();
      bills.sort_by_key(|b| std::cmp::Reverse(b.bill_no));
      Ok(bills)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), BillingError> {
      let mut store = self.store.lock().unwrap();
      if store
        .bills
        .get(&id)
        .is_some_and(|b| b.created_by == owner_id)
      {
        store.bills.remove(&id);
      }
      Ok(())
    }
  }

  #[async_trait]
  impl ChallanRepository for InMemory {
    async fn create(&self, draft: ChallanDraft) -> Result<Challan, BillingError> {
      let mut store = self.store.lock().unwrap();
      let owner_id = draft.created_by;
      let number = Self::allocate(
        &mut store,
        owner_id,
        DocumentType::Challan,
        draft.number,
        |store, n| {
          store
            .challans
            .values()
            .any(|c| c.created_by == owner_id && c.challan_no == n)
        },
      )?;
      let challan = Challan::from_draft(draft, number);
      store.challans.insert(challan.id, challan.clone());
      Ok(challan)
    }

    async fn update(&self, challan: Challan) -> Result<Challan, BillingError> {
      let mut store = self.store.lock().unwrap();
      store.challans.insert(challan.id, challan.clone());
      Ok(challan)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Challan>, BillingError> {
      let store = self.store.lock().unwrap();
      Ok(
        store
          .challans
          .get(&id)
          .filter(|c| c.created_by == owner_id)
          .cloned(),
      )
    }

    async fn find_by_owner(
      &self,
      owner_id: Uuid,
      party_id: Option<Uuid>,
    ) -> Result<Vec<Challan>, BillingError> {
      let store = self.store.lock().unwrap();
      let mut challans: Vec<Challan> = store
        .challans
        .values()
        .filter(|c| c.created_by == owner_id)
        .filter(|c| party_id.is_none_or(|p| c.party_id == p))
        .cloned()
        .collect();
      challans.sort_by_key(|c| std::cmp::Reverse(c.challan_no));
      Ok(challans)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), BillingError> {
      let mut store = self.store.lock().unwrap();
      if store
        .challans
        .get(&id)
        .is_some_and(|c| c.created_by == owner_id)
      {
        store.challans.remove(&id);
      }
      Ok(())
    }
  }

  #[async_trait]
  impl PartyRepository for InMemory {
    async fn create(&self, party: Party) -> Result<Party, PartyError> {
      let mut store = self.store.lock().unwrap();
      store.parties.insert(party.id, party.clone());
      Ok(party)
    }

    async fn update(&self, party: Party) -> Result<Party, PartyError> {
      let mut store = self.store.lock().unwrap();
      store.parties.insert(party.id, party.clone());
      Ok(party)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Party>, PartyError> {
      let store = self.store.lock().unwrap();
      Ok(
        store
          .parties
          .get(&id)
          .filter(|p| p.created_by == owner_id)
          .cloned(),
      )
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Party>, PartyError> {
      let store = self.store.lock().unwrap();
      Ok(
        store
          .parties
          .values()
          .filter(|p| p.created_by == owner_id)
          .cloned()
          .collect(),
      )
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), PartyError> {
      let mut store = self.store.lock().unwrap();
      if store
        .parties
        .get(&id)
        .is_some_and(|p| p.created_by == owner_id)
      {
        store.parties.remove(&id);
      }
      Ok(())
    }
  }

  #[async_trait]
  impl CounterStore for InMemory {
    async fn peek_next(&self, owner_id: Uuid, document_type: DocumentType) -> NextNumber {
      let store = self.store.lock().unwrap();
      let last = store
        .counters
        .get(&(owner_id, document_type))
        .copied()
        .unwrap_or(0);
      NextNumber {
        value: last + 1,
        fallback: false,
      }
    }
  }

  /// Counter store whose backing read always fails, exercising the
  /// assume-1-and-warn fallback.
  struct BrokenCounterStore;

  #[async_trait]
  impl CounterStore for BrokenCounterStore {
    async fn peek_next(&self, _owner_id: Uuid, _document_type: DocumentType) -> NextNumber {
      NextNumber {
        value: 1,
        fallback: true,
      }
    }
  }

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

  fn service_with(store: Arc<InMemory>) -> BillingService {
    BillingService::new(
      store.clone(),
      store.clone(),
      store.clone(),
      store,
      BillingServiceConfig {
        issuer: issuer(),
        default_gst_rate: GstRate::new(dec!(5)).unwrap(),
        allocation_timeout: Duration::from_secs(5),
      },
    )
  }

  async fn seed_party(service: &BillingService, owner_id: Uuid, state: &str) -> Party {
    let party = Party::new(
      owner_id,
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
        StateName::new(state.to_string()).unwrap(),
        None,
      ),
    );
    service.party_repo.create(party.clone()).await.unwrap();
    party
  }

  fn items(quantity: Decimal, unit_price: Decimal) -> Vec<LineItem> {
    vec![LineItem::new(
      ItemName::new("Cotton Fabric".to_string()).unwrap(),
      Some(HsnCode::new("5208".to_string()).unwrap()),
      Quantity::new(quantity).unwrap(),
      UnitPrice::new(unit_price).unwrap(),
    )]
  }

  fn bill_data(party_id: Uuid, rate: Decimal) -> BillData {
    BillData {
      number: NumberAssignment::Auto,
      bill_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
      party_id,
      challan_no: None,
      items: items(dec!(2), dec!(500)),
      discount: DiscountPercent::zero(),
      gst_rate: GstRate::new(rate).unwrap(),
      payment_method: PaymentMethod::Cheque,
      notes: None,
    }
  }

  #[tokio::test]
  async fn test_first_bill_gets_number_one() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    assert_eq!(
      service.peek_next_number(owner_id, DocumentType::Bill).await,
      NextNumber {
        value: 1,
        fallback: false
      }
    );

    let bill = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();
    assert_eq!(bill.bill_no, 1);
    assert_eq!(bill.status, BillStatus::Pending);

    assert_eq!(
      service
        .peek_next_number(owner_id, DocumentType::Bill)
        .await
        .value,
      2
    );
  }

  #[tokio::test]
  async fn test_intra_state_bill_amounts() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let bill = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();

    assert_eq!(bill.amounts.subtotal, dec!(1000));
    assert_eq!(bill.amounts.cgst, dec!(90));
    assert_eq!(bill.amounts.sgst, dec!(90));
    assert_eq!(bill.amounts.igst, dec!(0));
    assert_eq!(bill.amounts.rounded_total, dec!(1180));
  }

  #[tokio::test]
  async fn test_cross_state_bill_applies_igst() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Maharashtra").await;

    let bill = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();

    assert_eq!(bill.amounts.cgst, dec!(0));
    assert_eq!(bill.amounts.sgst, dec!(0));
    assert_eq!(bill.amounts.igst, dec!(180));
  }

  #[tokio::test]
  async fn test_explicit_number_collision_is_rejected() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let mut data = bill_data(party.id, dec!(18));
    data.number = NumberAssignment::Explicit(7);
    service.create_bill(owner_id, data).await.unwrap();

    let mut duplicate = bill_data(party.id, dec!(18));
    duplicate.number = NumberAssignment::Explicit(7);
    let err = service.create_bill(owner_id, duplicate).await.unwrap_err();
    assert!(matches!(
      err,
      BillingError::NumberAlreadyExists {
        document_type: DocumentType::Bill,
        number: 7
      }
    ));

    // the counter jumped past the manual number, so auto allocation is safe
    let next = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();
    assert_eq!(next.bill_no, 8);
  }

  #[tokio::test]
  async fn test_concurrent_allocations_are_gapless() {
    let store = Arc::new(InMemory::default());
    let service = Arc::new(service_with(store));
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let mut handles = Vec::new();
    for _ in 0..10 {
      let service = service.clone();
      let party_id = party.id;
      handles.push(tokio::spawn(async move {
        service
          .create_bill(owner_id, bill_data(party_id, dec!(18)))
          .await
          .unwrap()
          .bill_no
      }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
      numbers.push(handle.await.unwrap());
    }
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=10).collect::<Vec<i64>>());
  }

  #[tokio::test]
  async fn test_deleting_a_bill_never_rewinds_the_counter() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let bill = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();
    service.delete_bill(owner_id, bill.id).await.unwrap();

    let next = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();
    assert_eq!(next.bill_no, 2);
  }

  #[tokio::test]
  async fn test_bill_and_challan_sequences_are_independent() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();

    let challan = service
      .create_challan(
        owner_id,
        ChallanData {
          number: NumberAssignment::Auto,
          challan_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
          party_id: party.id,
          items: items(dec!(4), dec!(500)),
          discount: DiscountPercent::zero(),
          notes: None,
        },
      )
      .await
      .unwrap();
    assert_eq!(challan.challan_no, 1);
    assert_eq!(challan.amounts.gst_rate, dec!(0));
    assert_eq!(challan.amounts.total, dec!(2000));
  }

  #[tokio::test]
  async fn test_convert_challan_to_invoice() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let challan = service
      .create_challan(
        owner_id,
        ChallanData {
          number: NumberAssignment::Auto,
          challan_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
          party_id: party.id,
          items: items(dec!(4), dec!(500)),
          discount: DiscountPercent::zero(),
          notes: Some("Lot 42".to_string()),
        },
      )
      .await
      .unwrap();

    let bill = service.convert_challan(owner_id, challan.id).await.unwrap();

    // default 5% rate split for a same-state party, on the re-derived base
    assert_eq!(bill.amounts.taxable_amount, dec!(2000));
    assert_eq!(bill.amounts.cgst, dec!(50));
    assert_eq!(bill.amounts.sgst, dec!(50));
    assert_eq!(bill.amounts.igst, dec!(0));
    assert_eq!(bill.status, BillStatus::Pending);
    assert_eq!(bill.payment_method, PaymentMethod::Cheque);
    assert_eq!(bill.challan_no, Some(challan.challan_no));
    assert_eq!(bill.bill_no, 1);

    // the source challan is untouched
    let unchanged = service.get_challan(owner_id, challan.id).await.unwrap();
    assert_eq!(unchanged, challan);
  }

  #[tokio::test]
  async fn test_payment_lifecycle_through_service() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let bill = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();

    let paid = service
      .record_payment(
        owner_id,
        bill.id,
        PaymentData {
          method: PaymentMethod::Cheque,
          amount: dec!(1180),
          tds_percent: Percent::new(dec!(2)).unwrap(),
          other_claim_percent: Percent::zero(),
          brokerage_percent: Percent::new(dec!(1)).unwrap(),
          broker_name: Some("R. Mehta".to_string()),
          broker_phone: None,
          cheque_no: Some("004512".to_string()),
          bank_name: Some("SBI".to_string()),
          upi_id: None,
          upi_name: None,
          rtgs_neft_no: None,
          paid_on: NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
        },
      )
      .await
      .unwrap();

    assert_eq!(paid.status, BillStatus::Paid);
    let payment = paid.payment.as_ref().unwrap();
    assert_eq!(payment.tds_amount, dec!(20));
    assert_eq!(payment.brokerage_amount, dec!(10));

    let reopened = service.remove_payment(owner_id, bill.id).await.unwrap();
    assert_eq!(reopened.status, BillStatus::Pending);
    assert!(reopened.payment.is_none());
  }

  #[tokio::test]
  async fn test_cancel_guards() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let bill = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();
    let cancelled = service.cancel_bill(owner_id, bill.id).await.unwrap();
    assert_eq!(cancelled.status, BillStatus::Cancelled);

    let err = service.cancel_bill(owner_id, bill.id).await.unwrap_err();
    assert!(matches!(err, BillingError::Entity(_)));
  }

  #[tokio::test]
  async fn test_other_owners_documents_are_invisible() {
    let store = Arc::new(InMemory::default());
    let service = service_with(store);
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let bill = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap();

    let stranger = Uuid::new_v4();
    let err = service.get_bill(stranger, bill.id).await.unwrap_err();
    assert!(matches!(err, BillingError::BillNotFound(_)));
  }

  #[tokio::test]
  async fn test_counter_fallback_is_surfaced() {
    let store = Arc::new(InMemory::default());
    let service = BillingService::new(
      store.clone(),
      store.clone(),
      store,
      Arc::new(BrokenCounterStore),
      BillingServiceConfig {
        issuer: issuer(),
        default_gst_rate: GstRate::new(dec!(5)).unwrap(),
        allocation_timeout: Duration::from_secs(5),
      },
    );

    let next = service
      .peek_next_number(Uuid::new_v4(), DocumentType::Bill)
      .await;
    assert!(next.fallback);
    assert_eq!(next.value, 1);
  }

  /// Bill repository that hangs on create, driving the allocation timeout.
  struct StalledBillRepo(Arc<InMemory>);

  #[async_trait]
  impl BillRepository for StalledBillRepo {
    async fn create(&self, _draft: BillDraft) -> Result<Bill, BillingError> {
      tokio::time::sleep(Duration::from_secs(60)).await;
      unreachable!("create should have been timed out");
    }

    async fn update(&self, bill: Bill) -> Result<Bill, BillingError> {
      BillRepository::update(self.0.as_ref(), bill).await
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Bill>, BillingError> {
      BillRepository::find_by_id(self.0.as_ref(), owner_id, id).await
    }

    async fn find_by_owner(
      &self,
      owner_id: Uuid,
      filter: BillFilter,
    ) -> Result<Vec<Bill>, BillingError> {
      BillRepository::find_by_owner(self.0.as_ref(), owner_id, filter).await
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), BillingError> {
      BillRepository::delete(self.0.as_ref(), owner_id, id).await
    }
  }

  #[tokio::test]
  async fn test_stalled_allocation_times_out() {
    let store = Arc::new(InMemory::default());
    let service = BillingService::new(
      Arc::new(StalledBillRepo(store.clone())),
      store.clone(),
      store.clone(),
      store,
      BillingServiceConfig {
        issuer: issuer(),
        default_gst_rate: GstRate::new(dec!(5)).unwrap(),
        allocation_timeout: Duration::from_millis(20),
      },
    );
    let owner_id = Uuid::new_v4();
    let party = seed_party(&service, owner_id, "Gujarat").await;

    let err = service
      .create_bill(owner_id, bill_data(party.id, dec!(18)))
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      BillingError::AllocationTimeout {
        document_type: DocumentType::Bill
      }
    ));
  }
}
