use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  ClientName, DeliveryStatus, Invoice, InvoiceNumber, LineItem, Money, PaymentRecord,
  errors::InvoiceError, ports::InvoiceStore,
};

const INVOICE_COLUMNS: &str = r#"id, invoice_number, invoice_date, client_name, contact_number,
                 address, reference_number, serial_number, payment_mode,
                 delivery_date, delivery_status, discount, advance_amount,
                 line_items, total_amount, final_amount, pending_amount,
                 payment_history, version, created_at, updated_at"#;

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  invoice_number: String,
  invoice_date: NaiveDate,
  client_name: String,
  contact_number: String,
  address: String,
  reference_number: String,
  serial_number: String,
  payment_mode: String,
  delivery_date: NaiveDate,
  delivery_status: String,
  discount: Decimal,
  advance_amount: Decimal,
  line_items: serde_json::Value,
  total_amount: Decimal,
  final_amount: Decimal,
  pending_amount: Decimal,
  payment_history: serde_json::Value,
  version: i64,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let invoice_number = InvoiceNumber::new(row.invoice_number)?;
    let client_name = ClientName::new(row.client_name)?;
    let delivery_status = DeliveryStatus::from_str(&row.delivery_status)?;
    let line_items: Vec<LineItem> = serde_json::from_value(row.line_items)?;
    let payment_history: Vec<PaymentRecord> = serde_json::from_value(row.payment_history)?;

    Ok(Invoice {
      id: row.id,
      invoice_number,
      invoice_date: row.invoice_date,
      client_name,
      contact_number: row.contact_number,
      address: row.address,
      reference_number: row.reference_number,
      serial_number: row.serial_number,
      payment_mode: row.payment_mode,
      delivery_date: row.delivery_date,
      delivery_status,
      discount: Money::new(row.discount)?,
      advance_amount: Money::new(row.advance_amount)?,
      line_items,
      total_amount: Money::new(row.total_amount)?,
      final_amount: Money::new(row.final_amount)?,
      pending_amount: Money::new(row.pending_amount)?,
      payment_history,
      version: row.version,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresInvoiceStore {
  pool: PgPool,
}

impl PostgresInvoiceStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
  async fn insert(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let line_items = serde_json::to_value(&invoice.line_items)?;
    let payment_history = serde_json::to_value(&invoice.payment_history)?;

    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            INSERT INTO invoices (
                id, invoice_number, invoice_date, client_name, contact_number,
                address, reference_number, serial_number, payment_mode,
                delivery_date, delivery_status, discount, advance_amount,
                line_items, total_amount, final_amount, pending_amount,
                payment_history, version, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING {INVOICE_COLUMNS}
            "#
    ))
    .bind(invoice.id)
    .bind(invoice.invoice_number.value())
    .bind(invoice.invoice_date)
    .bind(invoice.client_name.value())
    .bind(&invoice.contact_number)
    .bind(&invoice.address)
    .bind(&invoice.reference_number)
    .bind(&invoice.serial_number)
    .bind(&invoice.payment_mode)
    .bind(invoice.delivery_date)
    .bind(invoice.delivery_status.as_str())
    .bind(invoice.discount.value())
    .bind(invoice.advance_amount.value())
    .bind(line_items)
    .bind(invoice.total_amount.value())
    .bind(invoice.final_amount.value())
    .bind(invoice.pending_amount.value())
    .bind(payment_history)
    .bind(invoice.version)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE id = $1
            "#
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            ORDER BY invoice_date DESC, created_at DESC
            "#
    ))
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn conditional_replace(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let line_items = serde_json::to_value(&invoice.line_items)?;
    let payment_history = serde_json::to_value(&invoice.payment_history)?;

    // The version predicate makes the replace atomic: a writer that lost the
    // race matches zero rows instead of clobbering the winner's update.
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            UPDATE invoices
            SET invoice_number = $3, invoice_date = $4, client_name = $5,
                contact_number = $6, address = $7, reference_number = $8,
                serial_number = $9, payment_mode = $10, delivery_date = $11,
                delivery_status = $12, total_amount = $13, final_amount = $14,
                pending_amount = $15, payment_history = $16, line_items = $17,
                updated_at = $18, version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING {INVOICE_COLUMNS}
            "#
    ))
    .bind(invoice.id)
    .bind(invoice.version)
    .bind(invoice.invoice_number.value())
    .bind(invoice.invoice_date)
    .bind(invoice.client_name.value())
    .bind(&invoice.contact_number)
    .bind(&invoice.address)
    .bind(&invoice.reference_number)
    .bind(&invoice.serial_number)
    .bind(&invoice.payment_mode)
    .bind(invoice.delivery_date)
    .bind(invoice.delivery_status.as_str())
    .bind(invoice.total_amount.value())
    .bind(invoice.final_amount.value())
    .bind(invoice.pending_amount.value())
    .bind(payment_history)
    .bind(line_items)
    .bind(invoice.updated_at)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => row.try_into(),
      None => {
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM invoices WHERE id = $1")
          .bind(invoice.id)
          .fetch_optional(&self.pool)
          .await?;
        if exists.is_some() {
          Err(InvoiceError::ConcurrencyConflict(invoice.id))
        } else {
          Err(InvoiceError::InvoiceNotFound(invoice.id))
        }
      }
    }
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::InvoiceNotFound(id));
    }
    Ok(())
  }
}
