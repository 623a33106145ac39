use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::billing::{CounterStore, DocumentType, NextNumber};

/// Atomically increments and returns the counter for (owner, document type).
/// First allocation creates the row with value 1. Runs on the caller's
/// transaction so the counter commit is inseparable from the document
/// insert; concurrent allocations serialize on the counter row.
pub(crate) async fn allocate_next(
  conn: &mut PgConnection,
  owner_id: Uuid,
  document_type: DocumentType,
) -> Result<i64, sqlx::Error> {
  sqlx::query_scalar::<_, i64>(
    r#"
        INSERT INTO counters (owner_id, document_type, last_value)
        VALUES ($1, $2, 1)
        ON CONFLICT (owner_id, document_type)
        DO UPDATE SET last_value = counters.last_value + 1
        RETURNING last_value
        "#,
  )
  .bind(owner_id)
  .bind(document_type.as_str())
  .fetch_one(conn)
  .await
}

/// Raises the counter to at least `number` after a manual entry, so later
/// automatic allocations cannot collide with it. Never lowers the counter.
pub(crate) async fn raise_counter_to(
  conn: &mut PgConnection,
  owner_id: Uuid,
  document_type: DocumentType,
  number: i64,
) -> Result<i64, sqlx::Error> {
  sqlx::query_scalar::<_, i64>(
    r#"
        INSERT INTO counters (owner_id, document_type, last_value)
        VALUES ($1, $2, $3)
        ON CONFLICT (owner_id, document_type)
        DO UPDATE SET last_value = GREATEST(counters.last_value, EXCLUDED.last_value)
        RETURNING last_value
        "#,
  )
  .bind(owner_id)
  .bind(document_type.as_str())
  .bind(number)
  .fetch_one(conn)
  .await
}

pub struct PostgresCounterStore {
  pool: PgPool,
}

impl PostgresCounterStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CounterStore for PostgresCounterStore {
  async fn peek_next(&self, owner_id: Uuid, document_type: DocumentType) -> NextNumber {
    let result = sqlx::query_scalar::<_, i64>(
      r#"
            SELECT last_value FROM counters
            WHERE owner_id = $1 AND document_type = $2
            "#,
    )
    .bind(owner_id)
    .bind(document_type.as_str())
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(last) => NextNumber {
        value: last.unwrap_or(0) + 1,
        fallback: false,
      },
      Err(e) => {
        // Never block document creation on a preview; assume a fresh
        // sequence and let the caller show a warning.
        tracing::warn!(error = %e, "failed to read counter for preview");
        NextNumber {
          value: 1,
          fallback: true,
        }
      }
    }
  }
}
