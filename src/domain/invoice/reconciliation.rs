//! Reconciliation rules: the one place that derives an invoice's monetary
//! state from its authoritative inputs (line items, discount, advance,
//! payment history). Every mutation path goes through these functions so the
//! formula cannot drift between call sites.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::entities::{Invoice, LineItem, PaymentRecord};
use super::errors::InvoiceError;
use super::value_objects::{DeliveryStatus, Money, ValueObjectError};

/// Derived monetary state. Calculated, never edited independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
  pub total_amount: Money,
  pub final_amount: Money,
  pub pending_amount: Money,
}

/// Compute the three derived amounts from scratch.
///
/// * `total_amount` is the exact decimal sum of the line totals.
/// * `final_amount` is total minus discount; a discount larger than the
///   total is rejected rather than producing a negative invoice.
/// * `pending_amount` is final minus advance minus recorded payments,
///   clamped at zero.
pub fn compute_totals(
  line_items: &[LineItem],
  discount: Money,
  advance_amount: Money,
  payments: &[PaymentRecord],
) -> Result<InvoiceTotals, ValueObjectError> {
  let total: Decimal = line_items.iter().map(|item| item.line_total()).sum();

  if discount.value() > total {
    return Err(ValueObjectError::InvalidDiscount(format!(
      "Discount {} exceeds invoice total {}",
      discount, total
    )));
  }

  let final_amount = total - discount.value();
  let paid: Decimal = payments.iter().map(|p| p.amount.value()).sum();
  let pending = (final_amount - advance_amount.value() - paid).max(Decimal::ZERO);

  Ok(InvoiceTotals {
    total_amount: Money::new(total)?,
    final_amount: Money::new(final_amount)?,
    pending_amount: Money::new(pending)?,
  })
}

/// Settle the entire current pending balance in one record.
///
/// The recorded amount is the pending balance at the moment of application,
/// never a caller-supplied figure, so concurrent edits cannot make a "full"
/// payment miss the mark.
pub fn apply_full_payment(
  invoice: &mut Invoice,
  idempotency_key: Option<Uuid>,
) -> Result<PaymentRecord, InvoiceError> {
  if invoice.is_settled() {
    return Err(InvoiceError::AlreadySettled(invoice.id));
  }

  let record = PaymentRecord::new(invoice.pending_amount, idempotency_key);
  invoice.payment_history.push(record.clone());
  reconcile(invoice)?;
  Ok(record)
}

/// Record a payment for part of the pending balance.
///
/// Zero and negative amounts are invalid; amounts above the pending balance
/// are rejected as overpayment instead of being silently clamped away.
pub fn apply_partial_payment(
  invoice: &mut Invoice,
  amount: Money,
  idempotency_key: Option<Uuid>,
) -> Result<PaymentRecord, InvoiceError> {
  if amount.is_zero() {
    return Err(InvoiceError::Validation(ValueObjectError::InvalidAmount(
      "Payment amount must be positive".to_string(),
    )));
  }
  if amount > invoice.pending_amount {
    return Err(InvoiceError::Overpayment {
      requested: amount,
      pending: invoice.pending_amount,
    });
  }

  let record = PaymentRecord::new(amount, idempotency_key);
  invoice.payment_history.push(record.clone());
  reconcile(invoice)?;
  Ok(record)
}

/// Remove a payment and rebuild the pending balance from the remaining
/// history. A reverse subtraction would drift once the balance has ever been
/// clamped, so the full formula is always used.
pub fn remove_payment(invoice: &mut Invoice, payment_id: Uuid) -> Result<(), InvoiceError> {
  if invoice.find_payment(payment_id).is_none() {
    return Err(InvoiceError::PaymentNotFound(payment_id));
  }

  invoice.payment_history.retain(|p| p.id != payment_id);
  reconcile(invoice)?;
  Ok(())
}

/// Change the persisted delivery status. Pure state label; no financial
/// recomputation.
pub fn update_delivery_status(invoice: &mut Invoice, status: DeliveryStatus) {
  invoice.delivery_status = status;
  invoice.touch();
}

/// Recompute derived amounts from the invoice's current inputs and stamp the
/// update time.
fn reconcile(invoice: &mut Invoice) -> Result<(), InvoiceError> {
  let totals = compute_totals(
    &invoice.line_items,
    invoice.discount,
    invoice.advance_amount,
    &invoice.payment_history,
  )?;
  invoice.total_amount = totals.total_amount;
  invoice.final_amount = totals.final_amount;
  invoice.pending_amount = totals.pending_amount;
  invoice.touch();
  Ok(())
}
