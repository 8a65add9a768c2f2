//! Read-only presentation helpers layered on ledger data: the date-derived
//! delivery label and the sort orders the listing pages rely on. Nothing in
//! here is persisted and nothing mutates an invoice.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::entities::Invoice;
use super::value_objects::DeliveryStatus;

/// Where an invoice's delivery date falls relative to today. This is a
/// display classification only; the authoritative state is the stored
/// `DeliveryStatus`, and the two must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeliveryLabel {
  Overdue,
  DueToday,
  Upcoming,
}

impl DeliveryLabel {
  /// The label text the delivery board historically rendered.
  pub fn as_str(&self) -> &'static str {
    match self {
      DeliveryLabel::Overdue => "Due",
      DeliveryLabel::DueToday => "Due Today",
      DeliveryLabel::Upcoming => "Pending",
    }
  }
}

pub fn delivery_label(delivery_date: NaiveDate, today: NaiveDate) -> DeliveryLabel {
  match delivery_date.cmp(&today) {
    Ordering::Less => DeliveryLabel::Overdue,
    Ordering::Equal => DeliveryLabel::DueToday,
    Ordering::Greater => DeliveryLabel::Upcoming,
  }
}

/// All-invoices view: anything still owed first, then latest invoice date.
pub fn sort_for_overview(invoices: &mut [Invoice]) {
  invoices.sort_by(|a, b| {
    let a_open = !a.pending_amount.is_zero();
    let b_open = !b.pending_amount.is_zero();
    b_open
      .cmp(&a_open)
      .then_with(|| b.invoice_date.cmp(&a.invoice_date))
  });
}

/// Delivery board: Due, then Pending, then Delivered. Undelivered work is
/// ordered soonest-first so the most urgent job tops its section; delivered
/// invoices show most recent first.
pub fn sort_for_delivery_board(invoices: &mut [Invoice]) {
  invoices.sort_by(|a, b| {
    a.delivery_status
      .rank()
      .cmp(&b.delivery_status.rank())
      .then_with(|| match a.delivery_status {
        DeliveryStatus::Delivered => b.delivery_date.cmp(&a.delivery_date),
        _ => a.delivery_date.cmp(&b.delivery_date),
      })
  });
}

/// Invoices per invoice date, for the orders calendar.
pub fn count_by_invoice_date(invoices: &[Invoice]) -> BTreeMap<NaiveDate, usize> {
  let mut counts = BTreeMap::new();
  for invoice in invoices {
    *counts.entry(invoice.invoice_date).or_insert(0) += 1;
  }
  counts
}

/// Invoices per delivery date, for the deliveries calendar.
pub fn count_by_delivery_date(invoices: &[Invoice]) -> BTreeMap<NaiveDate, usize> {
  let mut counts = BTreeMap::new();
  for invoice in invoices {
    *counts.entry(invoice.delivery_date).or_insert(0) += 1;
  }
  counts
}
