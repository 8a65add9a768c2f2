use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::views::{sort_for_delivery_board, sort_for_overview};
use crate::domain::invoice::{InvoiceError, InvoiceLedger};

/// Which presentation ordering to apply. The ledger itself imposes none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
  /// Open balances first, then latest invoice date.
  #[default]
  Overview,
  /// Due, Pending, Delivered, each section date-ordered.
  DeliveryBoard,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesCommand {
  #[serde(default)]
  pub order: ListOrder,
}

#[derive(Debug, Serialize)]
pub struct InvoiceListItemDto {
  pub invoice_id: Uuid,
  pub invoice_number: String,
  pub invoice_date: NaiveDate,
  pub client_name: String,
  pub delivery_date: NaiveDate,
  pub delivery_status: String,
  pub total_amount: Decimal,
  pub final_amount: Decimal,
  pub pending_amount: Decimal,
  pub settled: bool,
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl ListInvoicesUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(
    &self,
    command: ListInvoicesCommand,
  ) -> Result<ListInvoicesResponse, InvoiceError> {
    let mut invoices = self.ledger.list_invoices().await?;

    match command.order {
      ListOrder::Overview => sort_for_overview(&mut invoices),
      ListOrder::DeliveryBoard => sort_for_delivery_board(&mut invoices),
    }

    let invoices = invoices
      .into_iter()
      .map(|invoice| InvoiceListItemDto {
        invoice_id: invoice.id,
        invoice_number: invoice.invoice_number.into_inner(),
        invoice_date: invoice.invoice_date,
        client_name: invoice.client_name.into_inner(),
        delivery_date: invoice.delivery_date,
        delivery_status: invoice.delivery_status.as_str().to_string(),
        total_amount: invoice.total_amount.value(),
        final_amount: invoice.final_amount.value(),
        pending_amount: invoice.pending_amount.value(),
        settled: invoice.pending_amount.is_zero(),
      })
      .collect();

    Ok(ListInvoicesResponse { invoices })
  }
}
