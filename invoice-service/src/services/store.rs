//! Generic document-store contract consumed by the invoicing core.

use async_trait::async_trait;
use mongodb::bson::Document;
use service_core::error::AppError;

/// Collection holding one [`crate::models::Invoice`] per document.
pub const INVOICES: &str = "invoices";
/// Collection holding one [`crate::models::Settings`] per tenant.
pub const SETTINGS: &str = "settings";

/// Document operations the invoicing core needs from its backing store.
/// Filters and updates are BSON documents with MongoDB operator semantics
/// (`$set`, `$inc`, `$setOnInsert`). The store knows nothing about tenancy;
/// callers put `tenant_id` into every filter.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError>;

    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<Document>, AppError>;

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), AppError>;

    /// Apply `update` to the first matching document, optionally inserting
    /// one when nothing matches. Returns the matched count (0 on an upsert
    /// insert).
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<u64, AppError>;

    /// Returns the number of deleted documents (0 or 1).
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, AppError>;

    async fn count_documents(&self, collection: &str, filter: Document) -> Result<u64, AppError>;

    /// Atomically apply `update` to the first matching document and return
    /// the document as it was BEFORE the update. This is the primitive the
    /// counter allocator relies on: no other writer can interleave between
    /// the read and the write.
    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, AppError>;
}
