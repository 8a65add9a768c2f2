use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Invoice;
use super::errors::InvoiceError;

/// Persistence port for the invoice aggregate.
///
/// `conditional_replace` is the write half of the ledger's optimistic
/// concurrency scheme: the caller hands back the invoice at the version it
/// loaded, the store persists it with `version + 1`, and a
/// `ConcurrencyConflict` is returned when the stored version has moved.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
  async fn insert(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;
  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError>;
  async fn conditional_replace(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
}
