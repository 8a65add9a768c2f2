use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{
  ClientName, InvoiceData, InvoiceError, InvoiceLedger, InvoiceNumber, ItemName, LineItem, Money,
  Quantity,
};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceLineItemDto {
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub invoice_number: String,
  pub invoice_date: NaiveDate,
  pub client_name: String,
  pub contact_number: String,
  pub address: String,
  pub reference_number: String,
  pub serial_number: String,
  pub payment_mode: String,
  pub delivery_date: NaiveDate,
  pub discount: Decimal,
  pub advance_amount: Decimal,
  pub line_items: Vec<CreateInvoiceLineItemDto>,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
  pub invoice_id: Uuid,
  pub invoice_number: String,
  pub total_amount: Decimal,
  pub final_amount: Decimal,
  pub pending_amount: Decimal,
  pub created_at: DateTime<Utc>,
}

pub struct CreateInvoiceUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl CreateInvoiceUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<CreateInvoiceResponse, InvoiceError> {
    let line_items: Vec<LineItem> = command
      .line_items
      .into_iter()
      .map(|item| {
        let name = ItemName::new(item.name)?;
        let quantity = Quantity::new(item.quantity)?;
        let unit_price = Money::new(item.unit_price)?;
        Ok(LineItem::new(name, quantity, unit_price))
      })
      .collect::<Result<Vec<_>, InvoiceError>>()?;

    let data = InvoiceData {
      invoice_number: InvoiceNumber::new(command.invoice_number)?,
      invoice_date: command.invoice_date,
      client_name: ClientName::new(command.client_name)?,
      contact_number: command.contact_number,
      address: command.address,
      reference_number: command.reference_number,
      serial_number: command.serial_number,
      payment_mode: command.payment_mode,
      delivery_date: command.delivery_date,
      discount: Money::new(command.discount)?,
      advance_amount: Money::new(command.advance_amount)?,
      line_items,
    };

    let invoice = self.ledger.create_invoice(data).await?;

    Ok(CreateInvoiceResponse {
      invoice_id: invoice.id,
      invoice_number: invoice.invoice_number.into_inner(),
      total_amount: invoice.total_amount.value(),
      final_amount: invoice.final_amount.value(),
      pending_amount: invoice.pending_amount.value(),
      created_at: invoice.created_at,
    })
  }
}
