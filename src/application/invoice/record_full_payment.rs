use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceLedger};

/// Settle the entire pending balance. No amount is accepted from the caller:
/// the server pays exactly what is owed at apply time.
#[derive(Debug, Deserialize)]
pub struct RecordFullPaymentCommand {
  pub invoice_id: Uuid,
  /// Supply the same key on retry to avoid recording the payment twice.
  pub idempotency_key: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RecordFullPaymentResponse {
  pub invoice_id: Uuid,
  pub pending_amount: Decimal,
  pub total_paid: Decimal,
  pub settled: bool,
}

pub struct RecordFullPaymentUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl RecordFullPaymentUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: RecordFullPaymentCommand,
  ) -> Result<RecordFullPaymentResponse, InvoiceError> {
    let invoice = self
      .ledger
      .pay_full(command.invoice_id, command.idempotency_key)
      .await?;

    Ok(RecordFullPaymentResponse {
      invoice_id: invoice.id,
      pending_amount: invoice.pending_amount.value(),
      total_paid: invoice.total_paid().value(),
      settled: invoice.pending_amount.is_zero(),
    })
  }
}
