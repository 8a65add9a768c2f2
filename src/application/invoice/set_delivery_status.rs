use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{DeliveryStatus, InvoiceError, InvoiceLedger};

#[derive(Debug, Deserialize)]
pub struct SetDeliveryStatusCommand {
  pub invoice_id: Uuid,
  pub delivery_status: String,
}

#[derive(Debug, Serialize)]
pub struct SetDeliveryStatusResponse {
  pub invoice_id: Uuid,
  pub delivery_status: String,
}

pub struct SetDeliveryStatusUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl SetDeliveryStatusUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: SetDeliveryStatusCommand,
  ) -> Result<SetDeliveryStatusResponse, InvoiceError> {
    let status = DeliveryStatus::from_str(&command.delivery_status)?;

    let invoice = self
      .ledger
      .set_delivery_status(command.invoice_id, status)
      .await?;

    Ok(SetDeliveryStatusResponse {
      invoice_id: invoice.id,
      delivery_status: invoice.delivery_status.as_str().to_string(),
    })
  }
}
