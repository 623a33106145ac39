use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::AuthError;
use crate::domain::billing::{BillingEntityError, BillingError};
use crate::domain::party::PartyError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Record not found for this owner (404 Not Found)
  NotFound(String),

  /// Conflicting state: duplicate number, illegal status transition (409)
  Conflict(String),

  /// Authentication error (401 Unauthorized)
  Auth(AuthErrorKind),

  /// Transient backend failure worth retrying (503 Service Unavailable)
  Unavailable(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Missing or malformed Authorization header (401)
  InvalidToken,

  /// Session expired or unknown (401)
  InvalidSession,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Unavailable(msg) => write!(f, "Service unavailable: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidToken => (
          "invalid_token",
          "Invalid or missing authorization token".to_string(),
        ),
        AuthErrorKind::InvalidSession => {
          ("invalid_session", "Invalid or expired session".to_string())
        }
      },
      ApiError::Unavailable(msg) => ("unavailable", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details to clients
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert PartyError to ApiError
impl From<PartyError> for ApiError {
  fn from(error: PartyError) -> Self {
    match error {
      PartyError::Validation(err) => ApiError::Validation(err.to_string()),
      PartyError::NotFound(id) => ApiError::NotFound(format!("Party {} not found", id)),
      PartyError::Database(err) => ApiError::Internal(err.to_string()),
      PartyError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert BillingError to ApiError
impl From<BillingError> for ApiError {
  fn from(error: BillingError) -> Self {
    match error {
      BillingError::Validation(err) => ApiError::Validation(err.to_string()),
      BillingError::PartyValidation(err) => ApiError::Validation(err.to_string()),
      BillingError::Entity(err) => match err {
        BillingEntityError::PaymentFieldMissing { .. } => ApiError::Validation(err.to_string()),
        BillingEntityError::InvalidStatusTransition { .. }
        | BillingEntityError::NotEditable { .. }
        | BillingEntityError::NoPaymentRecorded => ApiError::Conflict(err.to_string()),
      },
      BillingError::PartyNotFound(id) => ApiError::NotFound(format!("Party {} not found", id)),
      BillingError::BillNotFound(id) => ApiError::NotFound(format!("Bill {} not found", id)),
      BillingError::ChallanNotFound(id) => {
        ApiError::NotFound(format!("Challan {} not found", id))
      }
      BillingError::NumberAlreadyExists { .. } => ApiError::Conflict(error.to_string()),
      BillingError::AllocationTimeout { .. } => ApiError::Unavailable(error.to_string()),
      BillingError::Database(err) => ApiError::Internal(err.to_string()),
      BillingError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidSession => ApiError::Auth(AuthErrorKind::InvalidSession),
      AuthError::Database(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}
