//! Shared test harness: an in-memory [`DocumentStore`] with MongoDB
//! operator semantics, plus payload builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use invoice_service::models::{InvoiceCreate, InvoiceItem, InvoiceType};
use invoice_service::services::{DocumentStore, InvoiceService, SettingsService};
use mongodb::bson::{Bson, Document};
use rust_decimal::Decimal;
use service_core::error::AppError;

pub const TENANT_A: &str = "tenant-a";
pub const TENANT_B: &str = "tenant-b";

/// In-memory document store. `find_one_and_update` holds the lock for the
/// whole read-modify-write, mirroring the per-document atomicity of
/// MongoDB's findOneAndUpdate that the counter allocator depends on.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, value)| doc.get(key) == Some(value))
}

fn as_i64(value: &Bson) -> i64 {
    match value {
        Bson::Int32(v) => i64::from(*v),
        Bson::Int64(v) => *v,
        Bson::Double(v) => *v as i64,
        _ => 0,
    }
}

fn apply_operators(target: &mut Document, update: &Document, inserting: bool) {
    if let Ok(set) = update.get_document("$set") {
        for (key, value) in set {
            target.insert(key, value.clone());
        }
    }
    if inserting {
        if let Ok(set_on_insert) = update.get_document("$setOnInsert") {
            for (key, value) in set_on_insert {
                target.insert(key, value.clone());
            }
        }
    }
    if let Ok(inc) = update.get_document("$inc") {
        for (key, value) in inc {
            let current = target.get(key).map(as_i64).unwrap_or(0);
            target.insert(key, Bson::Int64(current + as_i64(value)));
        }
    }
}

/// Upsert insert: equality fields from the filter, then the update
/// operators, as MongoDB composes a new document.
fn upsert_document(filter: &Document, update: &Document) -> Document {
    let mut doc = Document::new();
    for (key, value) in filter {
        if !key.starts_with('$') {
            doc.insert(key, value.clone());
        }
    }
    apply_operators(&mut doc, update, true);
    doc
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        let collections = self.collections.lock().expect("store lock");
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, &filter)).cloned()))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.lock().expect("store lock");
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), AppError> {
        let mut collections = self.collections.lock().expect("store lock");
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<u64, AppError> {
        let mut collections = self.collections.lock().expect("store lock");
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(doc) = docs.iter_mut().find(|doc| matches(doc, &filter)) {
            apply_operators(doc, &update, false);
            Ok(1)
        } else if upsert {
            docs.push(upsert_document(&filter, &update));
            Ok(0)
        } else {
            Ok(0)
        }
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        let mut collections = self.collections.lock().expect("store lock");
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.iter().position(|doc| matches(doc, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        let collections = self.collections.lock().expect("store lock");
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| matches(doc, &filter)).count() as u64)
            .unwrap_or(0))
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, AppError> {
        // Single guard across read and write: this is the atomicity the
        // allocator's reserve-and-advance relies on.
        let mut collections = self.collections.lock().expect("store lock");
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.iter_mut().find(|doc| matches(doc, &filter)) {
            Some(doc) => {
                let before = doc.clone();
                apply_operators(doc, &update, false);
                Ok(Some(before))
            }
            None => Ok(None),
        }
    }
}

pub struct TestApp {
    pub store: MemoryStore,
    pub invoices: InvoiceService<MemoryStore>,
    pub settings: SettingsService<MemoryStore>,
}

pub fn test_app() -> TestApp {
    service_core::observability::init_test_tracing();
    let store = MemoryStore::new();
    TestApp {
        invoices: InvoiceService::new(store.clone()),
        settings: SettingsService::new(store.clone()),
        store,
    }
}

pub fn invoice_payload() -> InvoiceCreate {
    InvoiceCreate {
        client_id: "client-1".to_string(),
        invoice_date: "2024-06-01".to_string(),
        due_date: "2024-06-30".to_string(),
        items: vec![InvoiceItem {
            description: "Brand design retainer".to_string(),
            quantity: Decimal::ONE,
            rate: Decimal::new(2500000, 2),
            amount: Decimal::new(2500000, 2),
        }],
        subtotal: Decimal::new(2500000, 2),
        cgst: Decimal::ZERO,
        sgst: Decimal::ZERO,
        igst: Decimal::new(450000, 2),
        total: Decimal::new(2950000, 2),
        status: "pending".to_string(),
        invoice_type: InvoiceType::Invoice,
        is_recurring: false,
        notes: None,
    }
}

pub fn quotation_payload() -> InvoiceCreate {
    InvoiceCreate {
        invoice_type: InvoiceType::Quotation,
        ..invoice_payload()
    }
}
