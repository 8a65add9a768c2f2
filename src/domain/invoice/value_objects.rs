use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid item name: {0}")]
  InvalidItemName(String),
  #[error("Invalid client name: {0}")]
  InvalidClientName(String),
  #[error("Invalid delivery status: {0}")]
  InvalidDeliveryStatus(String),
  #[error("Invalid discount: {0}")]
  InvalidDiscount(String),
}

// Invoice Number - User-editable text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Money - Non-negative currency amount, max 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
  pub fn new(amount: Decimal) -> Result<Self, ValueObjectError> {
    if amount.is_sign_negative() {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot be negative".to_string(),
      ));
    }
    if amount.scale() > 2 {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot have more than 2 decimal places".to_string(),
      ));
    }
    Ok(Self(amount))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }

  pub fn add(&self, other: Money) -> Money {
    Money(self.0 + other.0)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.2}", self.0)
  }
}

// Quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot be negative".to_string(),
      ));
    }
    // Max 3 decimal places
    if value.scale() > 3 {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot have more than 3 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Item Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 200 {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot exceed 200 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Client Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientName(String);

impl ClientName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Delivery Status - Persisted state label, mutated only via set_delivery_status.
// Distinct from the date-derived DeliveryLabel in views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
  Due,
  Pending,
  Delivered,
}

impl DeliveryStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      DeliveryStatus::Due => "Due",
      DeliveryStatus::Pending => "Pending",
      DeliveryStatus::Delivered => "Delivered",
    }
  }

  /// Sort rank for the delivery board: Due < Pending < Delivered.
  pub fn rank(&self) -> u8 {
    match self {
      DeliveryStatus::Due => 0,
      DeliveryStatus::Pending => 1,
      DeliveryStatus::Delivered => 2,
    }
  }
}

impl FromStr for DeliveryStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "due" => Ok(DeliveryStatus::Due),
      "pending" => Ok(DeliveryStatus::Pending),
      "delivered" => Ok(DeliveryStatus::Delivered),
      _ => Err(ValueObjectError::InvalidDeliveryStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for DeliveryStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_invoice_number() {
    assert!(InvoiceNumber::new("INV-001".to_string()).is_ok());
    assert!(InvoiceNumber::new("".to_string()).is_err());
    assert!(InvoiceNumber::new("   ".to_string()).is_err());
    assert_eq!(
      InvoiceNumber::new(" INV-005 ".to_string()).unwrap().value(),
      "INV-005"
    );
  }

  #[test]
  fn test_money() {
    let money = Money::new(dec!(100.50)).unwrap();
    assert_eq!(money.value(), dec!(100.50));
    assert!(Money::new(dec!(-10)).is_err());
    assert!(Money::new(dec!(1.005)).is_err()); // Too many decimals
    assert!(Money::zero().is_zero());
  }

  #[test]
  fn test_money_add() {
    let m1 = Money::new(dec!(100)).unwrap();
    let m2 = Money::new(dec!(50.25)).unwrap();
    assert_eq!(m1.add(m2).value(), dec!(150.25));
  }

  #[test]
  fn test_money_display() {
    assert_eq!(Money::new(dec!(5)).unwrap().to_string(), "5.00");
    assert_eq!(Money::new(dec!(12.3)).unwrap().to_string(), "12.30");
  }

  #[test]
  fn test_quantity() {
    assert!(Quantity::new(dec!(1)).is_ok());
    assert!(Quantity::new(dec!(0)).is_ok()); // Zero quantity is allowed
    assert!(Quantity::new(dec!(-1)).is_err());
    assert!(Quantity::new(dec!(1.1234)).is_err()); // Too many decimals
  }

  #[test]
  fn test_delivery_status() {
    assert_eq!(DeliveryStatus::from_str("due").unwrap(), DeliveryStatus::Due);
    assert_eq!(
      DeliveryStatus::from_str("Delivered").unwrap(),
      DeliveryStatus::Delivered
    );
    assert!(DeliveryStatus::from_str("Due Today").is_err());
    assert!(DeliveryStatus::from_str("shipped").is_err());
    assert_eq!(DeliveryStatus::Pending.as_str(), "Pending");
  }

  #[test]
  fn test_delivery_status_rank() {
    assert!(DeliveryStatus::Due.rank() < DeliveryStatus::Pending.rank());
    assert!(DeliveryStatus::Pending.rank() < DeliveryStatus::Delivered.rank());
  }

  #[test]
  fn test_client_name() {
    assert!(ClientName::new("Acme Traders".to_string()).is_ok());
    assert!(ClientName::new("  ".to_string()).is_err());
    assert!(ClientName::new("x".repeat(256)).is_err());
  }
}
