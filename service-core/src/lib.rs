//! service-core: shared infrastructure for the invoicing backend.
pub mod config;
pub mod error;
pub mod observability;
