use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceLedger, Money};

#[derive(Debug, Deserialize)]
pub struct RecordPartialPaymentCommand {
  pub invoice_id: Uuid,
  pub amount: Decimal,
  /// Supply the same key on retry to avoid recording the payment twice.
  pub idempotency_key: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RecordPartialPaymentResponse {
  pub invoice_id: Uuid,
  pub pending_amount: Decimal,
  pub total_paid: Decimal,
  pub settled: bool,
}

pub struct RecordPartialPaymentUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl RecordPartialPaymentUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: RecordPartialPaymentCommand,
  ) -> Result<RecordPartialPaymentResponse, InvoiceError> {
    let amount = Money::new(command.amount)?;

    let invoice = self
      .ledger
      .pay_partial(command.invoice_id, amount, command.idempotency_key)
      .await?;

    Ok(RecordPartialPaymentResponse {
      invoice_id: invoice.id,
      pending_amount: invoice.pending_amount.value(),
      total_paid: invoice.total_paid().value(),
      settled: invoice.pending_amount.is_zero(),
    })
  }
}
