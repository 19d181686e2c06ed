//! invoice-service: multi-tenant invoice numbering and lifecycle.
//!
//! The crate owns the stateful part of the invoicing backend: per-tenant
//! sequential invoice numbers, quotation-to-invoice conversion, and the
//! settings record that carries the numbering counter. Everything else
//! (auth, transport, email) lives with its collaborators; callers hand in an
//! already-authenticated `tenant_id` and the services trust it.

pub mod config;
pub mod models;
pub mod services;
pub mod startup;
