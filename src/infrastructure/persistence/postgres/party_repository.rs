use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::party::{
  Email, Gstin, MobileNumber, Party, PartyAddress, PartyError, PartyName, PartyRepository,
  Pincode, StateName,
};

#[derive(Debug, FromRow)]
struct PartyRow {
  id: Uuid,
  company_name: String,
  gstin: Option<String>,
  mobile_no: Option<String>,
  email: Option<String>,
  plot_house_no: Option<String>,
  line1: Option<String>,
  area: Option<String>,
  landmark: Option<String>,
  city: Option<String>,
  state: String,
  pincode: Option<String>,
  created_by: Uuid,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<PartyRow> for Party {
  type Error = PartyError;

  fn try_from(row: PartyRow) -> Result<Self, Self::Error> {
    let company_name = PartyName::new(row.company_name)?;
    let gstin = row.gstin.map(Gstin::new).transpose()?;
    let mobile_no = row.mobile_no.map(MobileNumber::new).transpose()?;
    let email = row.email.map(Email::new).transpose()?;
    let state = StateName::new(row.state)?;
    let pincode = row.pincode.map(Pincode::new).transpose()?;

    Ok(Party {
      id: row.id,
      company_name,
      gstin,
      mobile_no,
      email,
      address: PartyAddress::new(
        row.plot_house_no,
        row.line1,
        row.area,
        row.landmark,
        row.city,
        state,
        pincode,
      ),
      created_by: row.created_by,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresPartyRepository {
  pool: PgPool,
}

impl PostgresPartyRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl PartyRepository for PostgresPartyRepository {
  async fn create(&self, party: Party) -> Result<Party, PartyError> {
    let row = sqlx::query_as::<_, PartyRow>(
      r#"
            INSERT INTO parties (
                id, company_name, gstin, mobile_no, email,
                plot_house_no, line1, area, landmark, city, state, pincode,
                created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, company_name, gstin, mobile_no, email,
                      plot_house_no, line1, area, landmark, city, state, pincode,
                      created_by, created_at, updated_at
            "#,
    )
    .bind(party.id)
    .bind(party.company_name.value())
    .bind(party.gstin.as_ref().map(|g| g.value()))
    .bind(party.mobile_no.as_ref().map(|m| m.value()))
    .bind(party.email.as_ref().map(|e| e.value()))
    .bind(&party.address.plot_house_no)
    .bind(&party.address.line1)
    .bind(&party.address.area)
    .bind(&party.address.landmark)
    .bind(&party.address.city)
    .bind(party.address.state.value())
    .bind(party.address.pincode.as_ref().map(|p| p.value()))
    .bind(party.created_by)
    .bind(party.created_at)
    .bind(party.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(&self, party: Party) -> Result<Party, PartyError> {
    let row = sqlx::query_as::<_, PartyRow>(
      r#"
            UPDATE parties
            SET company_name = $3, gstin = $4, mobile_no = $5, email = $6,
                plot_house_no = $7, line1 = $8, area = $9, landmark = $10,
                city = $11, state = $12, pincode = $13, updated_at = $14
            WHERE id = $1 AND created_by = $2
            RETURNING id, company_name, gstin, mobile_no, email,
                      plot_house_no, line1, area, landmark, city, state, pincode,
                      created_by, created_at, updated_at
            "#,
    )
    .bind(party.id)
    .bind(party.created_by)
    .bind(party.company_name.value())
    .bind(party.gstin.as_ref().map(|g| g.value()))
    .bind(party.mobile_no.as_ref().map(|m| m.value()))
    .bind(party.email.as_ref().map(|e| e.value()))
    .bind(&party.address.plot_house_no)
    .bind(&party.address.line1)
    .bind(&party.address.area)
    .bind(&party.address.landmark)
    .bind(&party.address.city)
    .bind(party.address.state.value())
    .bind(party.address.pincode.as_ref().map(|p| p.value()))
    .bind(party.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Party>, PartyError> {
    let row = sqlx::query_as::<_, PartyRow>(
      r#"
            SELECT id, company_name, gstin, mobile_no, email,
                   plot_house_no, line1, area, landmark, city, state, pincode,
                   created_by, created_at, updated_at
            FROM parties
            WHERE id = $1 AND created_by = $2
            "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Party>, PartyError> {
    let rows = sqlx::query_as::<_, PartyRow>(
      r#"
            SELECT id, company_name, gstin, mobile_no, email,
                   plot_house_no, line1, area, landmark, city, state, pincode,
                   created_by, created_at, updated_at
            FROM parties
            WHERE created_by = $1
            ORDER BY created_at DESC
            "#,
    )
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), PartyError> {
    sqlx::query(
      r#"
      DELETE FROM parties
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
