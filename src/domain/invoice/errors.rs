use thiserror::Error;
use uuid::Uuid;

use super::value_objects::{Money, ValueObjectError};

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Payment not found: {0}")]
  PaymentNotFound(Uuid),

  #[error("Invoice {0} is already settled")]
  AlreadySettled(Uuid),

  #[error("Payment of {requested} exceeds pending amount {pending}")]
  Overpayment { requested: Money, pending: Money },

  #[error("Invoice {0} was modified concurrently")]
  ConcurrencyConflict(Uuid),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl InvoiceError {
  /// Only version conflicts are worth retrying; everything else is terminal
  /// for the request.
  pub fn is_retryable(&self) -> bool {
    matches!(self, InvoiceError::ConcurrencyConflict(_))
  }
}
