use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Invoice, InvoiceData, InvoicePatch};
use super::errors::InvoiceError;
use super::ports::InvoiceStore;
use super::reconciliation;
use super::value_objects::{DeliveryStatus, Money};

/// Bounded retries for optimistic-concurrency conflicts. A conflict means
/// another request won the write; re-reading and re-applying the rule is
/// cheap, but a hot invoice must eventually surface the failure.
const MAX_CONFLICT_RETRIES: u32 = 3;

enum MutateOutcome {
  Updated,
  Unchanged,
}

/// The invoice ledger: owns every mutation of invoice state.
///
/// Each mutating operation is a load -> reconciliation rule -> conditional
/// replace cycle against the store. A failed rule check never writes; a
/// version conflict retries the whole cycle so two concurrent payments can
/// never both subtract from the same stale balance.
pub struct InvoiceLedger {
  store: Arc<dyn InvoiceStore>,
}

impl InvoiceLedger {
  pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
    Self { store }
  }

  pub async fn create_invoice(&self, data: InvoiceData) -> Result<Invoice, InvoiceError> {
    let invoice = Invoice::new(data)?;
    tracing::info!(
      invoice_id = %invoice.id,
      invoice_number = %invoice.invoice_number,
      pending = %invoice.pending_amount,
      "creating invoice"
    );
    self.store.insert(invoice).await
  }

  pub async fn get_invoice(&self, id: Uuid) -> Result<Invoice, InvoiceError> {
    self.load(id).await
  }

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    self.store.find_all().await
  }

  pub async fn update_invoice(
    &self,
    id: Uuid,
    patch: InvoicePatch,
  ) -> Result<Invoice, InvoiceError> {
    self
      .mutate(id, |invoice| {
        invoice.apply_patch(patch.clone());
        Ok(MutateOutcome::Updated)
      })
      .await
  }

  pub async fn delete_invoice(&self, id: Uuid) -> Result<(), InvoiceError> {
    tracing::info!(invoice_id = %id, "deleting invoice");
    self.store.delete(id).await
  }

  /// Settle the entire pending balance. The server decides the amount.
  pub async fn pay_full(
    &self,
    id: Uuid,
    idempotency_key: Option<Uuid>,
  ) -> Result<Invoice, InvoiceError> {
    let invoice = self
      .mutate(id, |invoice| {
        if let Some(key) = idempotency_key {
          if invoice.payment_with_key(key).is_some() {
            return Ok(MutateOutcome::Unchanged);
          }
        }
        let record = reconciliation::apply_full_payment(invoice, idempotency_key)?;
        tracing::info!(invoice_id = %id, payment_id = %record.id, amount = %record.amount, "full payment recorded");
        Ok(MutateOutcome::Updated)
      })
      .await?;
    Ok(invoice)
  }

  pub async fn pay_partial(
    &self,
    id: Uuid,
    amount: Money,
    idempotency_key: Option<Uuid>,
  ) -> Result<Invoice, InvoiceError> {
    let invoice = self
      .mutate(id, |invoice| {
        if let Some(key) = idempotency_key {
          if invoice.payment_with_key(key).is_some() {
            return Ok(MutateOutcome::Unchanged);
          }
        }
        let record = reconciliation::apply_partial_payment(invoice, amount, idempotency_key)?;
        tracing::info!(invoice_id = %id, payment_id = %record.id, amount = %record.amount, pending = %invoice.pending_amount, "partial payment recorded");
        Ok(MutateOutcome::Updated)
      })
      .await?;
    Ok(invoice)
  }

  pub async fn delete_payment(
    &self,
    id: Uuid,
    payment_id: Uuid,
  ) -> Result<Invoice, InvoiceError> {
    self
      .mutate(id, |invoice| {
        reconciliation::remove_payment(invoice, payment_id)?;
        tracing::info!(invoice_id = %id, payment_id = %payment_id, pending = %invoice.pending_amount, "payment deleted");
        Ok(MutateOutcome::Updated)
      })
      .await
  }

  pub async fn set_delivery_status(
    &self,
    id: Uuid,
    status: DeliveryStatus,
  ) -> Result<Invoice, InvoiceError> {
    self
      .mutate(id, |invoice| {
        reconciliation::update_delivery_status(invoice, status);
        Ok(MutateOutcome::Updated)
      })
      .await
  }

  async fn load(&self, id: Uuid) -> Result<Invoice, InvoiceError> {
    self
      .store
      .find_by_id(id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(id))
  }

  /// Load-modify-replace with bounded conflict retry. The rule closure runs
  /// against a fresh copy on every attempt, so a retry always sees the state
  /// the winning writer left behind.
  async fn mutate<F>(&self, id: Uuid, mut apply: F) -> Result<Invoice, InvoiceError>
  where
    F: FnMut(&mut Invoice) -> Result<MutateOutcome, InvoiceError>,
  {
    let mut attempt = 0;
    loop {
      let mut invoice = self.load(id).await?;
      if let MutateOutcome::Unchanged = apply(&mut invoice)? {
        return Ok(invoice);
      }

      match self.store.conditional_replace(invoice).await {
        Ok(updated) => return Ok(updated),
        Err(err) if err.is_retryable() && attempt < MAX_CONFLICT_RETRIES => {
          attempt += 1;
          tracing::warn!(invoice_id = %id, attempt, "version conflict, retrying");
        }
        Err(err) => return Err(err),
      }
    }
  }
}
