use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::billing::{
  AmountBreakdown, BillingError, Challan, ChallanDraft, ChallanRepository, DocumentType,
  LineItem, NumberAssignment, PartySnapshot,
};

use super::counter_repository::{allocate_next, raise_counter_to};

#[derive(Debug, FromRow)]
struct ChallanRow {
  id: Uuid,
  challan_no: i64,
  challan_date: NaiveDate,
  party_id: Uuid,
  party: serde_json::Value,
  items: serde_json::Value,
  subtotal: Decimal,
  discount_percent: Decimal,
  discount_amount: Decimal,
  taxable_amount: Decimal,
  total: Decimal,
  rounded_total: Decimal,
  round_off: Decimal,
  notes: Option<String>,
  created_by: Uuid,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ChallanRow> for Challan {
  type Error = BillingError;

  fn try_from(row: ChallanRow) -> Result<Self, Self::Error> {
    let party: PartySnapshot = serde_json::from_value(row.party)
      .map_err(|e| BillingError::Internal(format!("Corrupt party snapshot: {}", e)))?;
    let items: Vec<LineItem> = serde_json::from_value(row.items)
      .map_err(|e| BillingError::Internal(format!("Corrupt item list: {}", e)))?;

    Ok(Challan {
      id: row.id,
      challan_no: row.challan_no,
      challan_date: row.challan_date,
      party_id: row.party_id,
      party,
      items,
      // challans never carry tax, so the GST legs are zero by construction
      amounts: AmountBreakdown {
        subtotal: row.subtotal,
        discount_percent: row.discount_percent,
        discount_amount: row.discount_amount,
        taxable_amount: row.taxable_amount,
        gst_rate: Decimal::ZERO,
        cgst: Decimal::ZERO,
        sgst: Decimal::ZERO,
        igst: Decimal::ZERO,
        total: row.total,
        rounded_total: row.rounded_total,
        round_off: row.round_off,
      },
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

pub struct PostgresChallanRepository {
  pool: PgPool,
}

impl PostgresChallanRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ChallanRepository for PostgresChallanRepository {
  async fn create(&self, draft: ChallanDraft) -> Result<Challan, BillingError> {
    let mut tx = self.pool.begin().await?;

    let challan_no = match draft.number {
      NumberAssignment::Auto => {
        allocate_next(&mut tx, draft.created_by, DocumentType::Challan).await?
      }
      NumberAssignment::Explicit(requested) => {
        let taken = sqlx::query_scalar::<_, bool>(
          r#"
                    SELECT EXISTS(
                        SELECT 1 FROM challans WHERE created_by = $1 AND challan_no = $2
                    )
                    "#,
        )
        .bind(draft.created_by)
        .bind(requested)
        .fetch_one(&mut *tx)
        .await?;

        if taken {
          return Err(BillingError::NumberAlreadyExists {
            document_type: DocumentType::Challan,
            number: requested,
          });
        }

        raise_counter_to(&mut tx, draft.created_by, DocumentType::Challan, requested).await?;
        requested
      }
    };

    let challan = Challan::from_draft(draft, challan_no);

    sqlx::query(
      r#"
            INSERT INTO challans (
                id, challan_no, challan_date, party_id, party, items,
                subtotal, discount_percent, discount_amount, taxable_amount,
                total, rounded_total, round_off, notes,
                created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17)
            "#,
    )
    .bind(challan.id)
    .bind(challan.challan_no)
    .bind(challan.challan_date)
    .bind(challan.party_id)
    .bind(to_json(&challan.party, "party snapshot")?)
    .bind(to_json(&challan.items, "item list")?)
    .bind(challan.amounts.subtotal)
    .bind(challan.amounts.discount_percent)
    .bind(challan.amounts.discount_amount)
    .bind(challan.amounts.taxable_amount)
    .bind(challan.amounts.total)
    .bind(challan.amounts.rounded_total)
    .bind(challan.amounts.round_off)
    .bind(&challan.notes)
    .bind(challan.created_by)
    .bind(challan.created_at)
    .bind(challan.updated_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23505")
          && db_err.constraint() == Some("challans_owner_number_unique")
        {
          return BillingError::NumberAlreadyExists {
            document_type: DocumentType::Challan,
            number: challan_no,
          };
        }
      }
      BillingError::Database(e)
    })?;

    tx.commit().await?;

    Ok(challan)
  }

  async fn update(&self, challan: Challan) -> Result<Challan, BillingError> {
    sqlx::query(
      r#"
            UPDATE challans
            SET challan_date = $3, party_id = $4, party = $5, items = $6,
                subtotal = $7, discount_percent = $8, discount_amount = $9,
                taxable_amount = $10, total = $11, rounded_total = $12,
                round_off = $13, notes = $14, updated_at = $15
            WHERE id = $1 AND created_by = $2
            "#,
    )
    .bind(challan.id)
    .bind(challan.created_by)
    .bind(challan.challan_date)
    .bind(challan.party_id)
    .bind(to_json(&challan.party, "party snapshot")?)
    .bind(to_json(&challan.items, "item list")?)
    .bind(challan.amounts.subtotal)
    .bind(challan.amounts.discount_percent)
    .bind(challan.amounts.discount_amount)
    .bind(challan.amounts.taxable_amount)
    .bind(challan.amounts.total)
    .bind(challan.amounts.rounded_total)
    .bind(challan.amounts.round_off)
    .bind(&challan.notes)
    .bind(challan.updated_at)
    .execute(&self.pool)
    .await?;

    Ok(challan)
  }

  async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Challan>, BillingError> {
    let row = sqlx::query_as::<_, ChallanRow>(
      r#"
            SELECT id, challan_no, challan_date, party_id, party, items,
                   subtotal, discount_percent, discount_amount, taxable_amount,
                   total, rounded_total, round_off, notes,
                   created_by, created_at, updated_at
            FROM challans
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
    party_id: Option<Uuid>,
  ) -> Result<Vec<Challan>, BillingError> {
    let rows = sqlx::query_as::<_, ChallanRow>(
      r#"
            SELECT id, challan_no, challan_date, party_id, party, items,
                   subtotal, discount_percent, discount_amount, taxable_amount,
                   total, rounded_total, round_off, notes,
                   created_by, created_at, updated_at
            FROM challans
            WHERE created_by = $1
              AND ($2::uuid IS NULL OR party_id = $2)
            ORDER BY challan_no DESC
            "#,
    )
    .bind(owner_id)
    .bind(party_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), BillingError> {
    sqlx::query(
      r#"
      DELETE FROM challans
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
