pub mod entities;
pub mod errors;
pub mod ports;
pub mod reconciliation;
pub mod services;
pub mod value_objects;
pub mod views;

pub use entities::{Invoice, InvoiceData, InvoicePatch, LineItem, PaymentRecord};
pub use errors::InvoiceError;
pub use ports::InvoiceStore;
pub use reconciliation::InvoiceTotals;
pub use services::InvoiceLedger;
pub use value_objects::{
  ClientName, DeliveryStatus, InvoiceNumber, ItemName, Money, Quantity, ValueObjectError,
};
pub use views::DeliveryLabel;
