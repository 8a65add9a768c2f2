use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceLedger};

#[derive(Debug, Deserialize)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: Uuid,
}

pub struct DeleteInvoiceUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl DeleteInvoiceUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self, command: DeleteInvoiceCommand) -> Result<(), InvoiceError> {
    self.ledger.delete_invoice(command.invoice_id).await
  }
}
