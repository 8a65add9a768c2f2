use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, errors::InvoiceError, ports::InvoiceStore};

/// In-memory store honoring the same version contract as the postgres
/// adapter. Backs the test suite and any embedding that wants to run
/// without a database.
#[derive(Default)]
pub struct InMemoryInvoiceStore {
  invoices: RwLock<HashMap<Uuid, Invoice>>,
}

impl InMemoryInvoiceStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
  async fn insert(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let mut invoices = self.invoices.write().await;
    invoices.insert(invoice.id, invoice.clone());
    Ok(invoice)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let invoices = self.invoices.read().await;
    Ok(invoices.get(&id).cloned())
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoices.read().await;
    Ok(invoices.values().cloned().collect())
  }

  async fn conditional_replace(&self, mut invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let mut invoices = self.invoices.write().await;
    let current = invoices
      .get(&invoice.id)
      .ok_or(InvoiceError::InvoiceNotFound(invoice.id))?;

    // Same check-and-swap the postgres adapter performs in SQL; the write
    // lock makes it atomic here.
    if current.version != invoice.version {
      return Err(InvoiceError::ConcurrencyConflict(invoice.id));
    }

    invoice.version += 1;
    invoices.insert(invoice.id, invoice.clone());
    Ok(invoice)
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    let mut invoices = self.invoices.write().await;
    invoices
      .remove(&id)
      .map(|_| ())
      .ok_or(InvoiceError::InvoiceNotFound(id))
  }
}
