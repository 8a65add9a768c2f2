use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::InvoiceError;
use super::reconciliation;
use super::value_objects::{ClientName, DeliveryStatus, InvoiceNumber, ItemName, Money, Quantity};

// Invoice Line Item - Immutable once the invoice is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub name: ItemName,
  pub quantity: Quantity,
  pub unit_price: Money,
}

impl LineItem {
  pub fn new(name: ItemName, quantity: Quantity, unit_price: Money) -> Self {
    Self {
      name,
      quantity,
      unit_price,
    }
  }

  /// quantity x unit price, rounded to currency precision.
  pub fn line_total(&self) -> Decimal {
    (self.quantity.value() * self.unit_price.value()).round_dp(2)
  }
}

// Payment Record - Append-only; removed only by explicit deletion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
  pub id: Uuid,
  pub amount: Money,
  pub recorded_at: DateTime<Utc>,
  /// Caller-supplied key making payment application safe to retry.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub idempotency_key: Option<Uuid>,
}

impl PaymentRecord {
  pub fn new(amount: Money, idempotency_key: Option<Uuid>) -> Self {
    Self {
      id: Uuid::new_v4(),
      amount,
      recorded_at: Utc::now(),
      idempotency_key,
    }
  }
}

/// Invoice creation data. Everything here is fixed at creation except the
/// delivery status and the payment history.
#[derive(Debug, Clone)]
pub struct InvoiceData {
  pub invoice_number: InvoiceNumber,
  pub invoice_date: NaiveDate,
  pub client_name: ClientName,
  pub contact_number: String,
  pub address: String,
  pub reference_number: String,
  pub serial_number: String,
  pub payment_mode: String,
  pub delivery_date: NaiveDate,
  pub discount: Money,
  pub advance_amount: Money,
  pub line_items: Vec<LineItem>,
}

/// Metadata patch. Financial fields and line items are deliberately absent:
/// they never change after creation, so patching requires no recomputation.
#[derive(Debug, Clone, Default)]
pub struct InvoicePatch {
  pub client_name: Option<ClientName>,
  pub contact_number: Option<String>,
  pub address: Option<String>,
  pub reference_number: Option<String>,
  pub serial_number: Option<String>,
  pub payment_mode: Option<String>,
  pub invoice_date: Option<NaiveDate>,
  pub delivery_date: Option<NaiveDate>,
}

// Invoice - Aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub invoice_number: InvoiceNumber,
  pub invoice_date: NaiveDate,
  pub client_name: ClientName,
  pub contact_number: String,
  pub address: String,
  pub reference_number: String,
  pub serial_number: String,
  pub payment_mode: String,
  pub delivery_date: NaiveDate,
  pub delivery_status: DeliveryStatus,
  pub discount: Money,
  pub advance_amount: Money,
  pub line_items: Vec<LineItem>,
  pub total_amount: Money,
  pub final_amount: Money,
  pub pending_amount: Money,
  pub payment_history: Vec<PaymentRecord>,
  /// Optimistic concurrency counter, bumped by the store on every replace.
  pub version: i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Invoice {
  pub fn new(data: InvoiceData) -> Result<Self, InvoiceError> {
    let totals = reconciliation::compute_totals(
      &data.line_items,
      data.discount,
      data.advance_amount,
      &[],
    )?;

    let now = Utc::now();
    Ok(Self {
      id: Uuid::new_v4(),
      invoice_number: data.invoice_number,
      invoice_date: data.invoice_date,
      client_name: data.client_name,
      contact_number: data.contact_number,
      address: data.address,
      reference_number: data.reference_number,
      serial_number: data.serial_number,
      payment_mode: data.payment_mode,
      delivery_date: data.delivery_date,
      delivery_status: DeliveryStatus::Due,
      discount: data.discount,
      advance_amount: data.advance_amount,
      line_items: data.line_items,
      total_amount: totals.total_amount,
      final_amount: totals.final_amount,
      pending_amount: totals.pending_amount,
      payment_history: Vec::new(),
      version: 0,
      created_at: now,
      updated_at: now,
    })
  }

  pub fn apply_patch(&mut self, patch: InvoicePatch) {
    if let Some(client_name) = patch.client_name {
      self.client_name = client_name;
    }
    if let Some(contact_number) = patch.contact_number {
      self.contact_number = contact_number;
    }
    if let Some(address) = patch.address {
      self.address = address;
    }
    if let Some(reference_number) = patch.reference_number {
      self.reference_number = reference_number;
    }
    if let Some(serial_number) = patch.serial_number {
      self.serial_number = serial_number;
    }
    if let Some(payment_mode) = patch.payment_mode {
      self.payment_mode = payment_mode;
    }
    if let Some(invoice_date) = patch.invoice_date {
      self.invoice_date = invoice_date;
    }
    if let Some(delivery_date) = patch.delivery_date {
      self.delivery_date = delivery_date;
    }
    self.touch();
  }

  pub fn is_settled(&self) -> bool {
    self.pending_amount.is_zero()
  }

  pub fn total_paid(&self) -> Money {
    self
      .payment_history
      .iter()
      .fold(Money::zero(), |acc, p| acc.add(p.amount))
  }

  pub fn find_payment(&self, payment_id: Uuid) -> Option<&PaymentRecord> {
    self.payment_history.iter().find(|p| p.id == payment_id)
  }

  pub fn payment_with_key(&self, key: Uuid) -> Option<&PaymentRecord> {
    self
      .payment_history
      .iter()
      .find(|p| p.idempotency_key == Some(key))
  }

  pub(crate) fn touch(&mut self) {
    self.updated_at = Utc::now();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn item(name: &str, qty: Decimal, price: Decimal) -> LineItem {
    LineItem::new(
      ItemName::new(name.to_string()).unwrap(),
      Quantity::new(qty).unwrap(),
      Money::new(price).unwrap(),
    )
  }

  fn sample_data() -> InvoiceData {
    InvoiceData {
      invoice_number: InvoiceNumber::new("INV-001".to_string()).unwrap(),
      invoice_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
      client_name: ClientName::new("Acme Traders".to_string()).unwrap(),
      contact_number: "9876543210".to_string(),
      address: "12 Market Road".to_string(),
      reference_number: "REF-77".to_string(),
      serial_number: "SN-001".to_string(),
      payment_mode: "Cash".to_string(),
      delivery_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
      discount: Money::new(dec!(10)).unwrap(),
      advance_amount: Money::new(dec!(20)).unwrap(),
      line_items: vec![item("Widget", dec!(2), dec!(50)), item("Gadget", dec!(1), dec!(30))],
    }
  }

  #[test]
  fn test_line_total() {
    assert_eq!(item("Widget", dec!(2), dec!(50)).line_total(), dec!(100));
    assert_eq!(item("Cloth", dec!(2.5), dec!(0.99)).line_total(), dec!(2.48));
  }

  #[test]
  fn test_invoice_creation_derives_totals() {
    let invoice = Invoice::new(sample_data()).unwrap();
    assert_eq!(invoice.total_amount.value(), dec!(130));
    assert_eq!(invoice.final_amount.value(), dec!(120));
    assert_eq!(invoice.pending_amount.value(), dec!(100));
    assert_eq!(invoice.delivery_status, DeliveryStatus::Due);
    assert_eq!(invoice.version, 0);
    assert!(invoice.payment_history.is_empty());
    assert!(!invoice.is_settled());
  }

  #[test]
  fn test_invoice_creation_rejects_excess_discount() {
    let mut data = sample_data();
    data.discount = Money::new(dec!(500)).unwrap();
    assert!(Invoice::new(data).is_err());
  }

  #[test]
  fn test_apply_patch_leaves_financials_alone() {
    let mut invoice = Invoice::new(sample_data()).unwrap();
    let patch = InvoicePatch {
      client_name: Some(ClientName::new("New Client".to_string()).unwrap()),
      payment_mode: Some("UPI".to_string()),
      ..Default::default()
    };
    invoice.apply_patch(patch);

    assert_eq!(invoice.client_name.value(), "New Client");
    assert_eq!(invoice.payment_mode, "UPI");
    assert_eq!(invoice.pending_amount.value(), dec!(100));
    assert_eq!(invoice.total_amount.value(), dec!(130));
  }

  #[test]
  fn test_total_paid_sums_history() {
    let mut invoice = Invoice::new(sample_data()).unwrap();
    invoice
      .payment_history
      .push(PaymentRecord::new(Money::new(dec!(40)).unwrap(), None));
    invoice
      .payment_history
      .push(PaymentRecord::new(Money::new(dec!(25.50)).unwrap(), None));
    assert_eq!(invoice.total_paid().value(), dec!(65.50));
  }

  #[test]
  fn test_payment_with_key() {
    let mut invoice = Invoice::new(sample_data()).unwrap();
    let key = Uuid::new_v4();
    invoice
      .payment_history
      .push(PaymentRecord::new(Money::new(dec!(40)).unwrap(), Some(key)));

    assert!(invoice.payment_with_key(key).is_some());
    assert!(invoice.payment_with_key(Uuid::new_v4()).is_none());
  }
}
