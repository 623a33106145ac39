use async_trait::async_trait;

use super::entities::Owner;
use super::errors::AuthError;

/// Resolves a session token to its owner.
///
/// Issuing sessions (registration, login, password handling) belongs to the
/// external auth service; this service only needs the ownership-scoping key
/// for the current request. Implementations receive the raw bearer token and
/// are responsible for any hashing scheme the session store uses.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
  /// Returns the owner for a live session, or `None` for an unknown or
  /// expired token.
  async fn verify(&self, token: &str) -> Result<Option<Owner>, AuthError>;
}
