use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::billing::{
  AmountBreakdown, Bill, BillDraft, BillFilter, BillRepository, BillStatus, BillingError,
  DocumentType, LineItem, NumberAssignment, PartySnapshot, PaymentDetails, PaymentMethod,
};

use super::counter_repository::{allocate_next, raise_counter_to};

#[derive(Debug, FromRow)]
struct BillRow {
  id: Uuid,
  bill_no: i64,
  challan_no: Option<i64>,
  bill_date: NaiveDate,
  party_id: Uuid,
  party: serde_json::Value,
  items: serde_json::Value,
  subtotal: Decimal,
  discount_percent: Decimal,
  discount_amount: Decimal,
  taxable_amount: Decimal,
  gst_rate: Decimal,
  cgst: Decimal,
  sgst: Decimal,
  igst: Decimal,
  total: Decimal,
  rounded_total: Decimal,
  round_off: Decimal,
  status: String,
  payment_method: String,
  payment: Option<serde_json::Value>,
  notes: Option<String>,
  created_by: Uuid,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<BillRow> for Bill {
  type Error = BillingError;

  fn try_from(row: BillRow) -> Result<Self, Self::Error> {
    let party: PartySnapshot = serde_json::from_value(row.party)
      .map_err(|e| BillingError::Internal(format!("Corrupt party snapshot: {}", e)))?;
    let items: Vec<LineItem> = serde_json::from_value(row.items)
      .map_err(|e| BillingError::Internal(format!("Corrupt item list: {}", e)))?;
    let payment: Option<PaymentDetails> = row
      .payment
      .map(serde_json::from_value)
      .transpose()
      .map_err(|e| BillingError::Internal(format!("Corrupt payment details: {}", e)))?;
    let status = BillStatus::from_str(&row.status)?;
    let payment_method = PaymentMethod::from_str(&row.payment_method)?;

    Ok(Bill {
      id: row.id,
      bill_no: row.bill_no,
      challan_no: row.challan_no,
      bill_date: row.bill_date,
      party_id: row.party_id,
      party,
      items,
      amounts: AmountBreakdown {
        subtotal: row.subtotal,
        discount_percent: row.discount_percent,
        discount_amount: row.discount_amount,
        taxable_amount: row.taxable_amount,
        gst_rate: row.gst_rate,
        cgst: row.cgst,
        sgst: row.sgst,
        igst: row.igst,
        total: row.total,
        rounded_total: row.rounded_total,
        round_off: row.round_off,
      },
      status,
      payment_method,
      payment,
      notes: row.notes,
      created_by: row.created_by,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

fn to_json<T: serde::Serialize>(value: &T, what: &str) -> Result<serde_json::Value, BillingError> {
  serde_json::to_value(value)
    .map_err(|e| BillingError::Internal(format!("Failed to encode {}: {}", what, e)))
}

pub struct PostgresBillRepository {
  pool: PgPool,
}

impl PostgresBillRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl BillRepository for PostgresBillRepository {
  async fn create(&self, draft: BillDraft) -> Result<Bill, BillingError> {
    let mut tx = self.pool.begin().await?;

    // Number and document commit together: dropping the transaction on any
    // failure (or on the caller's timeout) releases the counter untouched.
    let bill_no = match draft.number {
      NumberAssignment::Auto => {
        allocate_next(&mut tx, draft.created_by, DocumentType::Bill).await?
      }
      NumberAssignment::Explicit(requested) => {
        let taken = sqlx::query_scalar::<_, bool>(
          r#"
                    SELECT EXISTS(
                        SELECT 1 FROM bills WHERE created_by = $1 AND bill_no = $2
                    )
                    "#,
        )
        .bind(draft.created_by)
        .bind(requested)
        .fetch_one(&mut *tx)
        .await?;

        if taken {
          return Err(BillingError::NumberAlreadyExists {
            document_type: DocumentType::Bill,
            number: requested,
          });
        }

        raise_counter_to(&mut tx, draft.created_by, DocumentType::Bill, requested).await?;
        requested
      }
    };

    let bill = Bill::from_draft(draft, bill_no);

    sqlx::query(
      r#"
            INSERT INTO bills (
                id, bill_no, challan_no, bill_date, party_id, party, items,
                subtotal, discount_percent, discount_amount, taxable_amount,
                gst_rate, cgst, sgst, igst, total, rounded_total, round_off,
                status, payment_method, payment, notes,
                created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
            "#,
    )
    .bind(bill.id)
    .bind(bill.bill_no)
    .bind(bill.challan_no)
    .bind(bill.bill_date)
    .bind(bill.party_id)
    .bind(to_json(&bill.party, "party snapshot")?)
    .bind(to_json(&bill.items, "item list")?)
    .bind(bill.amounts.subtotal)
    .bind(bill.amounts.discount_percent)
    .bind(bill.amounts.discount_amount)
    .bind(bill.amounts.taxable_amount)
    .bind(bill.amounts.gst_rate)
    .bind(bill.amounts.cgst)
    .bind(bill.amounts.sgst)
    .bind(bill.amounts.igst)
    .bind(bill.amounts.total)
    .bind(bill.amounts.rounded_total)
    .bind(bill.amounts.round_off)
    .bind(bill.status.as_str())
    .bind(bill.payment_method.as_str())
    .bind(None::<serde_json::Value>)
    .bind(&bill.notes)
    .bind(bill.created_by)
    .bind(bill.created_at)
    .bind(bill.updated_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        // Unique violation on (created_by, bill_no): a concurrent manual
        // entry won the race for this number.
        if db_err.code().as_deref() == Some("23505")
          && db_err.constraint() == Some("bills_owner_number_unique")
        {
          return BillingError::NumberAlreadyExists {
            document_type: DocumentType::Bill,
            number: bill_no,
          };
        }
      }
      BillingError::Database(e)
    })?;

    tx.commit().await?;

    Ok(bill)
  }

  async fn update(&self, bill: Bill) -> Result<Bill, BillingError> {
    sqlx::query(
      r#"
            UPDATE bills
            SET bill_date = $3, party_id = $4, party = $5, items = $6,
                subtotal = $7, discount_percent = $8, discount_amount = $9,
                taxable_amount = $10, gst_rate = $11, cgst = $12, sgst = $13,
                igst = $14, total = $15, rounded_total = $16, round_off = $17,
                status = $18, payment_method = $19, payment = $20, notes = $21,
                updated_at = $22
            WHERE id = $1 AND created_by = $2
            "#,
    )
    .bind(bill.id)
    .bind(bill.created_by)
    .bind(bill.bill_date)
    .bind(bill.party_id)
    .bind(to_json(&bill.party, "party snapshot")?)
    .bind(to_json(&bill.items, "item list")?)
    .bind(bill.amounts.subtotal)
    .bind(bill.amounts.discount_percent)
    .bind(bill.amounts.discount_amount)
    .bind(bill.amounts.taxable_amount)
    .bind(bill.amounts.gst_rate)
    .bind(bill.amounts.cgst)
    .bind(bill.amounts.sgst)
    .bind(bill.amounts.igst)
    .bind(bill.amounts.total)
    .bind(bill.amounts.rounded_total)
    .bind(bill.amounts.round_off)
    .bind(bill.status.as_str())
    .bind(bill.payment_method.as_str())
    .bind(
      bill
        .payment
        .as_ref()
        .map(|p| to_json(p, "payment details"))
        .transpose()?,
    )
    .bind(&bill.notes)
    .bind(bill.updated_at)
    .execute(&self.pool)
    .await?;

    Ok(bill)
  }

  async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Bill>, BillingError> {
    let row = sqlx::query_as::<_, BillRow>(
      r#"
            SELECT id, bill_no, challan_no, bill_date, party_id, party, items,
                   subtotal, discount_percent, discount_amount, taxable_amount,
                   gst_rate, cgst, sgst, igst, total, rounded_total, round_off,
                   status, payment_method, payment, notes,
                   created_by, created_at, updated_at
            FROM bills
            WHERE id = $1 AND created_by = $2
            "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_owner(
    &self,
    owner_id: Uuid,
    filter: BillFilter,
  ) -> Result<Vec<Bill>, BillingError> {
    let rows = sqlx::query_as::<_, BillRow>(
      r#"
            SELECT id, bill_no, challan_no, bill_date, party_id, party, items,
                   subtotal, discount_percent, discount_amount, taxable_amount,
                   gst_rate, cgst, sgst, igst, total, rounded_total, round_off,
                   status, payment_method, payment, notes,
                   created_by, created_at, updated_at
            FROM bills
            WHERE created_by = $1
              AND ($2::uuid IS NULL OR party_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY bill_no DESC
            "#,
    )
    .bind(owner_id)
    .bind(filter.party_id)
    .bind(filter.status.map(|s| s.as_str()))
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), BillingError> {
    // Counters are not touched here: a deleted bill's number is gone for
    // good, never reissued.
    sqlx::query(
      r#"
      DELETE FROM bills
      WHERE id = $1 AND created_by = $2
      "#,
    )
    .bind(id)
    .bind(owner_id)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}
