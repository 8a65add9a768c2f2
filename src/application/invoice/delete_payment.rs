use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceLedger};

#[derive(Debug, Deserialize)]
pub struct DeletePaymentCommand {
  pub invoice_id: Uuid,
  pub payment_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DeletePaymentResponse {
  pub invoice_id: Uuid,
  /// Pending balance recomputed from the remaining payment history.
  pub pending_amount: Decimal,
  pub total_paid: Decimal,
}

pub struct DeletePaymentUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl DeletePaymentUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: DeletePaymentCommand,
  ) -> Result<DeletePaymentResponse, InvoiceError> {
    let invoice = self
      .ledger
      .delete_payment(command.invoice_id, command.payment_id)
      .await?;

    Ok(DeletePaymentResponse {
      invoice_id: invoice.id,
      pending_amount: invoice.pending_amount.value(),
      total_paid: invoice.total_paid().value(),
    })
  }
}
