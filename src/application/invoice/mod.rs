pub mod create_invoice;
pub mod delete_invoice;
pub mod delete_payment;
pub mod get_calendar;
pub mod get_invoice;
pub mod list_invoices;
pub mod record_full_payment;
pub mod record_partial_payment;
pub mod set_delivery_status;
pub mod update_invoice;

pub use create_invoice::{
  CreateInvoiceCommand, CreateInvoiceLineItemDto, CreateInvoiceResponse, CreateInvoiceUseCase,
};
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use delete_payment::{DeletePaymentCommand, DeletePaymentResponse, DeletePaymentUseCase};
pub use get_calendar::{CalendarResponse, DayCountDto, GetCalendarUseCase};
pub use get_invoice::{
  GetInvoiceCommand, GetInvoiceUseCase, InvoiceDetailsResponse, LineItemDto, PaymentRecordDto,
};
pub use list_invoices::{
  InvoiceListItemDto, ListInvoicesCommand, ListInvoicesResponse, ListInvoicesUseCase, ListOrder,
};
pub use record_full_payment::{
  RecordFullPaymentCommand, RecordFullPaymentResponse, RecordFullPaymentUseCase,
};
pub use record_partial_payment::{
  RecordPartialPaymentCommand, RecordPartialPaymentResponse, RecordPartialPaymentUseCase,
};
pub use set_delivery_status::{
  SetDeliveryStatusCommand, SetDeliveryStatusResponse, SetDeliveryStatusUseCase,
};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceResponse, UpdateInvoiceUseCase};
