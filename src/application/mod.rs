//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Each external operation of the invoicing
//! core maps to one use case; the (out-of-scope) HTTP adapter calls these and
//! maps the typed errors to responses.

pub mod invoice;
