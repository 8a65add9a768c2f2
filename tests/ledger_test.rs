use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use billbook::application::invoice::{
  CreateInvoiceCommand, CreateInvoiceLineItemDto, CreateInvoiceUseCase, GetCalendarUseCase,
  GetInvoiceCommand, GetInvoiceUseCase, ListInvoicesCommand, ListInvoicesUseCase, ListOrder,
  RecordPartialPaymentCommand, RecordPartialPaymentUseCase, SetDeliveryStatusCommand,
  SetDeliveryStatusUseCase,
};
use billbook::domain::invoice::{
  ClientName, InvoiceData, InvoiceError, InvoiceLedger, InvoiceNumber, InvoicePatch, ItemName,
  LineItem, Money, Quantity,
};
use billbook::infrastructure::persistence::InMemoryInvoiceStore;

fn ledger() -> Arc<InvoiceLedger> {
  Arc::new(InvoiceLedger::new(Arc::new(InMemoryInvoiceStore::new())))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn item(name: &str, qty: Decimal, price: Decimal) -> LineItem {
  LineItem::new(
    ItemName::new(name.to_string()).unwrap(),
    Quantity::new(qty).unwrap(),
    Money::new(price).unwrap(),
  )
}

fn invoice_data(
  number: &str,
  line_items: Vec<LineItem>,
  discount: Decimal,
  advance: Decimal,
) -> InvoiceData {
  InvoiceData {
    invoice_number: InvoiceNumber::new(number.to_string()).unwrap(),
    invoice_date: date(2026, 2, 1),
    client_name: ClientName::new("Acme Traders".to_string()).unwrap(),
    contact_number: "9876543210".to_string(),
    address: "12 Market Road".to_string(),
    reference_number: "REF-77".to_string(),
    serial_number: "SN-001".to_string(),
    payment_mode: "Cash".to_string(),
    delivery_date: date(2026, 2, 10),
    discount: Money::new(discount).unwrap(),
    advance_amount: Money::new(advance).unwrap(),
    line_items,
  }
}

/// The concrete scenario from the product brief: items 2x50 + 1x30,
/// discount 10, advance 20.
fn scenario_data(number: &str) -> InvoiceData {
  invoice_data(
    number,
    vec![item("Widget", dec!(2), dec!(50)), item("Gadget", dec!(1), dec!(30))],
    dec!(10),
    dec!(20),
  )
}

#[tokio::test]
async fn create_then_get_round_trips() {
  let ledger = ledger();
  let created = ledger.create_invoice(scenario_data("INV-001")).await.unwrap();

  assert_eq!(created.total_amount.value(), dec!(130));
  assert_eq!(created.final_amount.value(), dec!(120));
  assert_eq!(created.pending_amount.value(), dec!(100));

  let fetched = ledger.get_invoice(created.id).await.unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_invoice_fails() {
  let ledger = ledger();
  let result = ledger.get_invoice(Uuid::new_v4()).await;
  assert!(matches!(result, Err(InvoiceError::InvoiceNotFound(_))));
}

#[tokio::test]
async fn partial_then_full_then_delete_payment() {
  let ledger = ledger();
  let invoice = ledger.create_invoice(scenario_data("INV-002")).await.unwrap();

  let invoice = ledger
    .pay_partial(invoice.id, Money::new(dec!(40)).unwrap(), None)
    .await
    .unwrap();
  assert_eq!(invoice.pending_amount.value(), dec!(60));
  assert_eq!(invoice.payment_history.len(), 1);
  assert_eq!(invoice.payment_history[0].amount.value(), dec!(40));

  let invoice = ledger.pay_full(invoice.id, None).await.unwrap();
  assert_eq!(invoice.pending_amount.value(), dec!(0));
  assert_eq!(invoice.payment_history.len(), 2);
  assert_eq!(invoice.payment_history[1].amount.value(), dec!(60));

  // Deleting the 60 must recompute from the remaining history, not
  // reverse-subtract: pending goes back to 60.
  let full_payment_id = invoice.payment_history[1].id;
  let invoice = ledger.delete_payment(invoice.id, full_payment_id).await.unwrap();
  assert_eq!(invoice.pending_amount.value(), dec!(60));
  assert_eq!(invoice.payment_history.len(), 1);
}

#[tokio::test]
async fn full_payment_on_settled_invoice_is_rejected() {
  let ledger = ledger();
  let invoice = ledger.create_invoice(scenario_data("INV-003")).await.unwrap();
  let invoice = ledger.pay_full(invoice.id, None).await.unwrap();
  assert!(invoice.pending_amount.is_zero());

  let result = ledger.pay_full(invoice.id, None).await;
  assert!(matches!(result, Err(InvoiceError::AlreadySettled(_))));

  // State unchanged.
  let after = ledger.get_invoice(invoice.id).await.unwrap();
  assert_eq!(after.payment_history.len(), 1);
  assert!(after.pending_amount.is_zero());
}

#[tokio::test]
async fn overpayment_is_rejected_without_write() {
  let ledger = ledger();
  let invoice = ledger.create_invoice(scenario_data("INV-004")).await.unwrap();

  let result = ledger
    .pay_partial(invoice.id, Money::new(dec!(100.01)).unwrap(), None)
    .await;
  assert!(matches!(result, Err(InvoiceError::Overpayment { .. })));

  let after = ledger.get_invoice(invoice.id).await.unwrap();
  assert_eq!(after.pending_amount.value(), dec!(100));
  assert!(after.payment_history.is_empty());
  assert_eq!(after.version, 0);
}

#[tokio::test]
async fn metadata_patch_never_touches_financials() {
  let ledger = ledger();
  let invoice = ledger.create_invoice(scenario_data("INV-005")).await.unwrap();

  let patch = InvoicePatch {
    client_name: Some(ClientName::new("Bharat Fabrics".to_string()).unwrap()),
    delivery_date: Some(date(2026, 3, 1)),
    ..Default::default()
  };
  let updated = ledger.update_invoice(invoice.id, patch).await.unwrap();

  assert_eq!(updated.client_name.value(), "Bharat Fabrics");
  assert_eq!(updated.delivery_date, date(2026, 3, 1));
  assert_eq!(updated.pending_amount.value(), dec!(100));
  assert_eq!(updated.version, invoice.version + 1);
}

#[tokio::test]
async fn delete_invoice_is_hard() {
  let ledger = ledger();
  let invoice = ledger.create_invoice(scenario_data("INV-006")).await.unwrap();

  ledger.delete_invoice(invoice.id).await.unwrap();
  assert!(matches!(
    ledger.get_invoice(invoice.id).await,
    Err(InvoiceError::InvoiceNotFound(_))
  ));
  assert!(matches!(
    ledger.delete_invoice(invoice.id).await,
    Err(InvoiceError::InvoiceNotFound(_))
  ));
}

#[tokio::test]
async fn concurrent_partial_payments_never_lose_an_update() {
  let ledger = ledger();
  // Pending 50.
  let invoice = ledger
    .create_invoice(invoice_data(
      "INV-007",
      vec![item("Widget", dec!(1), dec!(50))],
      dec!(0),
      dec!(0),
    ))
    .await
    .unwrap();

  let a = {
    let ledger = Arc::clone(&ledger);
    let id = invoice.id;
    tokio::spawn(async move {
      ledger.pay_partial(id, Money::new(dec!(30)).unwrap(), None).await
    })
  };
  let b = {
    let ledger = Arc::clone(&ledger);
    let id = invoice.id;
    tokio::spawn(async move {
      ledger.pay_partial(id, Money::new(dec!(30)).unwrap(), None).await
    })
  };

  let results = [a.await.unwrap(), b.await.unwrap()];
  let successes = results.iter().filter(|r| r.is_ok()).count();

  // Exactly one 30 fits into the 50: the loser either serializes after the
  // winner and trips the overpayment check, or surfaces a conflict. Either
  // way no payment is silently lost or double-applied.
  assert_eq!(successes, 1);
  for result in &results {
    if let Err(err) = result {
      assert!(matches!(
        err,
        InvoiceError::Overpayment { .. } | InvoiceError::ConcurrencyConflict(_)
      ));
    }
  }

  let after = ledger.get_invoice(invoice.id).await.unwrap();
  assert_eq!(after.payment_history.len(), 1);
  assert_eq!(after.pending_amount.value(), dec!(20));
}

#[tokio::test]
async fn idempotency_key_applies_payment_at_most_once() {
  let ledger = ledger();
  let invoice = ledger.create_invoice(scenario_data("INV-008")).await.unwrap();
  let key = Uuid::new_v4();

  let first = ledger
    .pay_partial(invoice.id, Money::new(dec!(40)).unwrap(), Some(key))
    .await
    .unwrap();
  assert_eq!(first.pending_amount.value(), dec!(60));

  // Blind retry with the same key returns current state without appending.
  let second = ledger
    .pay_partial(invoice.id, Money::new(dec!(40)).unwrap(), Some(key))
    .await
    .unwrap();
  assert_eq!(second.pending_amount.value(), dec!(60));
  assert_eq!(second.payment_history.len(), 1);

  // A different key is a genuinely new payment.
  let third = ledger
    .pay_partial(invoice.id, Money::new(dec!(40)).unwrap(), Some(Uuid::new_v4()))
    .await
    .unwrap();
  assert_eq!(third.pending_amount.value(), dec!(20));
  assert_eq!(third.payment_history.len(), 2);
}

#[tokio::test]
async fn full_payment_idempotency_key_replays_cleanly() {
  let ledger = ledger();
  let invoice = ledger.create_invoice(scenario_data("INV-009")).await.unwrap();
  let key = Uuid::new_v4();

  let first = ledger.pay_full(invoice.id, Some(key)).await.unwrap();
  assert!(first.pending_amount.is_zero());

  // Without the key this would be AlreadySettled; with it the retry is a
  // no-op success.
  let second = ledger.pay_full(invoice.id, Some(key)).await.unwrap();
  assert_eq!(second.payment_history.len(), 1);
}

#[tokio::test]
async fn use_cases_cover_the_external_surface() {
  let ledger = ledger();
  let create = CreateInvoiceUseCase::new(Arc::clone(&ledger));
  let get = GetInvoiceUseCase::new(Arc::clone(&ledger));
  let pay_partial = RecordPartialPaymentUseCase::new(Arc::clone(&ledger));
  let set_status = SetDeliveryStatusUseCase::new(Arc::clone(&ledger));
  let list = ListInvoicesUseCase::new(Arc::clone(&ledger));

  let created = create
    .execute(CreateInvoiceCommand {
      invoice_number: "INV-100".to_string(),
      invoice_date: date(2026, 2, 1),
      client_name: "Acme Traders".to_string(),
      contact_number: "9876543210".to_string(),
      address: "12 Market Road".to_string(),
      reference_number: "REF-77".to_string(),
      serial_number: "SN-001".to_string(),
      payment_mode: "Cash".to_string(),
      delivery_date: date(2026, 2, 10),
      discount: dec!(10),
      advance_amount: dec!(20),
      line_items: vec![
        CreateInvoiceLineItemDto {
          name: "Widget".to_string(),
          quantity: dec!(2),
          unit_price: dec!(50),
        },
        CreateInvoiceLineItemDto {
          name: "Gadget".to_string(),
          quantity: dec!(1),
          unit_price: dec!(30),
        },
      ],
    })
    .await
    .unwrap();
  assert_eq!(created.pending_amount, dec!(100));

  let paid = pay_partial
    .execute(RecordPartialPaymentCommand {
      invoice_id: created.invoice_id,
      amount: dec!(40),
      idempotency_key: None,
    })
    .await
    .unwrap();
  assert_eq!(paid.pending_amount, dec!(60));
  assert!(!paid.settled);

  let status = set_status
    .execute(SetDeliveryStatusCommand {
      invoice_id: created.invoice_id,
      delivery_status: "Delivered".to_string(),
    })
    .await
    .unwrap();
  assert_eq!(status.delivery_status, "Delivered");

  // "Due Today" is a display label, never a storable status.
  let bad_status = set_status
    .execute(SetDeliveryStatusCommand {
      invoice_id: created.invoice_id,
      delivery_status: "Due Today".to_string(),
    })
    .await;
  assert!(matches!(bad_status, Err(InvoiceError::Validation(_))));

  let details = get
    .execute(GetInvoiceCommand {
      invoice_id: created.invoice_id,
    })
    .await
    .unwrap();
  assert_eq!(details.payment_history.len(), 1);
  assert_eq!(details.pending_amount, dec!(60));
  assert_eq!(details.delivery_status, "Delivered");

  let listed = list
    .execute(ListInvoicesCommand {
      order: ListOrder::Overview,
    })
    .await
    .unwrap();
  assert_eq!(listed.invoices.len(), 1);
  assert_eq!(listed.invoices[0].pending_amount, dec!(60));

  let calendar = GetCalendarUseCase::new(Arc::clone(&ledger))
    .execute()
    .await
    .unwrap();
  assert_eq!(calendar.orders.len(), 1);
  assert_eq!(calendar.orders[0].date, date(2026, 2, 1));
  assert_eq!(calendar.deliveries[0].date, date(2026, 2, 10));
}

#[tokio::test]
async fn overview_listing_puts_open_balances_first() {
  let ledger = ledger();
  let list = ListInvoicesUseCase::new(Arc::clone(&ledger));

  let open = ledger.create_invoice(scenario_data("INV-200")).await.unwrap();
  let settled = ledger.create_invoice(scenario_data("INV-201")).await.unwrap();
  ledger.pay_full(settled.id, None).await.unwrap();

  let listed = list
    .execute(ListInvoicesCommand {
      order: ListOrder::Overview,
    })
    .await
    .unwrap();

  assert_eq!(listed.invoices[0].invoice_id, open.id);
  assert!(!listed.invoices[0].settled);
  assert!(listed.invoices[1].settled);
}
