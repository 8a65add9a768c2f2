use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::views::{count_by_delivery_date, count_by_invoice_date};
use crate::domain::invoice::{InvoiceError, InvoiceLedger};

#[derive(Debug, Serialize)]
pub struct DayCountDto {
  pub date: NaiveDate,
  pub count: usize,
}

/// Per-day invoice and delivery counts for the calendar views.
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
  pub orders: Vec<DayCountDto>,
  pub deliveries: Vec<DayCountDto>,
}

pub struct GetCalendarUseCase {
  ledger: Arc<InvoiceLedger>,
}

impl GetCalendarUseCase {
  pub fn new(ledger: Arc<InvoiceLedger>) -> Self {
    Self { ledger }
  }

  pub async fn execute(&self) -> Result<CalendarResponse, InvoiceError> {
    let invoices = self.ledger.list_invoices().await?;

    let orders = count_by_invoice_date(&invoices)
      .into_iter()
      .map(|(date, count)| DayCountDto { date, count })
      .collect();

    let deliveries = count_by_delivery_date(&invoices)
      .into_iter()
      .map(|(date, count)| DayCountDto { date, count })
      .collect();

    Ok(CalendarResponse { orders, deliveries })
  }
}
