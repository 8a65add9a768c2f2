//! billbook - invoice ledger and payment reconciliation core for a
//! small-business billing application.
//!
//! The domain layer owns the reconciliation rules (the single formula that
//! derives total/final/pending amounts) and the ledger service that applies
//! them through atomic read-modify-write cycles. The application layer
//! exposes one use case per external operation; infrastructure provides the
//! postgres and in-memory store adapters, configuration and telemetry.

pub mod application;
pub mod domain;
pub mod infrastructure;
