pub mod memory;
pub mod postgres;

pub use memory::InMemoryInvoiceStore;
pub use postgres::PostgresInvoiceStore;
