use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{AuthError, Owner, SessionVerifier};

/// Session lookup against the shared auth store. Tokens are stored hashed;
/// the raw bearer token is hashed here and matched against a live session.
/// Session issuance belongs to the external auth service.
pub struct PostgresSessionStore {
  pool: PgPool,
}

impl PostgresSessionStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn hash_token(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

#[async_trait]
impl SessionVerifier for PostgresSessionStore {
  async fn verify(&self, token: &str) -> Result<Option<Owner>, AuthError> {
    let token_hash = hash_token(token);

    let user_id = sqlx::query_scalar::<_, Uuid>(
      r#"
            SELECT user_id FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
    )
    .bind(&token_hash)
    .fetch_optional(&self.pool)
    .await?;

    Ok(user_id.map(Owner::new))
  }
}
