use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid or expired session")]
  InvalidSession,

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
