use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{ClientName, InvoiceError, InvoiceLedger, InvoicePatch};

/// Metadata-only patch. Financial fields and line items are fixed at
/// creation and have no place here.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceCommand {
  pub invoice_id: Uuid,
  pub client_name: Option<String>,
  pub contact_number: Option<String>,
  pub address: Option<String>,
  pub reference_number: Option<String>,
  pub serial_number: Option<String>,
  pub payment_mode: Option<String>,
  pub invoice_date: Option<NaiveDate>,
  pub delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct UpdateInvoiceResponse {
  pub invoice_id: Uuid,
  pub updated_at: DateTime<Utc>,
}

pub struct UpdateInvoiceUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl UpdateInvoiceUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: UpdateInvoiceCommand,
  ) -> Result<UpdateInvoiceResponse, InvoiceError> {
    let client_name = command.client_name.map(ClientName::new).transpose()?;

    let patch = InvoicePatch {
      client_name,
      contact_number: command.contact_number,
      address: command.address,
      reference_number: command.reference_number,
      serial_number: command.serial_number,
      payment_mode: command.payment_mode,
      invoice_date: command.invoice_date,
      delivery_date: command.delivery_date,
    };

    let invoice = self.ledger.update_invoice(command.invoice_id, patch).await?;

    Ok(UpdateInvoiceResponse {
      invoice_id: invoice.id,
      updated_at: invoice.updated_at,
    })
  }
}
