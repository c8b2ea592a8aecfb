//! Request-scoped extractors.
//!
//! - [`unit_of_work::UnitOfWork`] -- Opens the per-request database transaction.

pub mod unit_of_work;
