use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PartyError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Party not found: {0}")]
  NotFound(Uuid),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
