use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::views::delivery_label;
use crate::domain::invoice::{Invoice, InvoiceError, InvoiceLedger};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct LineItemDto {
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub line_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PaymentRecordDto {
  pub payment_id: Uuid,
  pub amount: Decimal,
  pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  pub invoice_id: Uuid,
  pub invoice_number: String,
  pub invoice_date: NaiveDate,
  pub client_name: String,
  pub contact_number: String,
  pub address: String,
  pub reference_number: String,
  pub serial_number: String,
  pub payment_mode: String,
  pub delivery_date: NaiveDate,
  pub delivery_status: String,
  /// Date-derived display label, distinct from the stored status.
  pub delivery_label: String,
  pub discount: Decimal,
  pub advance_amount: Decimal,
  pub total_amount: Decimal,
  pub final_amount: Decimal,
  pub pending_amount: Decimal,
  pub settled: bool,
  pub line_items: Vec<LineItemDto>,
  pub payment_history: Vec<PaymentRecordDto>,
  pub version: i64,
}

pub struct GetInvoiceUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl GetInvoiceUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let invoice = self.ledger.get_invoice(command.invoice_id).await?;
    Ok(to_details(invoice, Utc::now().date_naive()))
  }
}

fn to_details(invoice: Invoice, today: NaiveDate) -> InvoiceDetailsResponse {
  let line_items = invoice
    .line_items
    .iter()
    .map(|item| LineItemDto {
      name: item.name.value().to_string(),
      quantity: item.quantity.value(),
      unit_price: item.unit_price.value(),
      line_total: item.line_total(),
    })
    .collect();

  let payment_history = invoice
    .payment_history
    .iter()
    .map(|p| PaymentRecordDto {
      payment_id: p.id,
      amount: p.amount.value(),
      recorded_at: p.recorded_at,
    })
    .collect();

  let label = delivery_label(invoice.delivery_date, today);

  InvoiceDetailsResponse {
    invoice_id: invoice.id,
    invoice_number: invoice.invoice_number.into_inner(),
    invoice_date: invoice.invoice_date,
    client_name: invoice.client_name.into_inner(),
    contact_number: invoice.contact_number,
    address: invoice.address,
    reference_number: invoice.reference_number,
    serial_number: invoice.serial_number,
    payment_mode: invoice.payment_mode,
    delivery_date: invoice.delivery_date,
    delivery_status: invoice.delivery_status.as_str().to_string(),
    delivery_label: label.as_str().to_string(),
    discount: invoice.discount.value(),
    advance_amount: invoice.advance_amount.value(),
    total_amount: invoice.total_amount.value(),
    final_amount: invoice.final_amount.value(),
    pending_amount: invoice.pending_amount.value(),
    settled: invoice.pending_amount.is_zero(),
    line_items,
    payment_history,
    version: invoice.version,
  }
}
