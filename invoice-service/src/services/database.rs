//! MongoDB-backed [`DocumentStore`] implementation.

use crate::services::store::{DocumentStore, INVOICES, SETTINGS};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument, UpdateOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Connected to MongoDB database");
        Ok(Self { client, db })
    }

    /// Index bootstrap. The unique index on `settings.tenant_id` is what
    /// makes the lazy get-or-create safe under concurrent first access: the
    /// losing upsert is absorbed instead of creating a second record.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for invoice-service");

        let settings_tenant = IndexModel::builder()
            .keys(doc! { "tenant_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("settings_tenant_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        self.collection(SETTINGS)
            .create_index(settings_tenant, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create unique tenant index on settings: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on settings.tenant_id");

        let invoice_lookup = IndexModel::builder()
            .keys(doc! { "tenant_id": 1, "_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("invoice_tenant_lookup".to_string())
                    .build(),
            )
            .build();
        self.collection(INVOICES)
            .create_index(invoice_lookup, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create tenant lookup index on invoices: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on invoices.(tenant_id, _id)");

        let invoice_list = IndexModel::builder()
            .keys(doc! { "tenant_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("invoice_tenant_list".to_string())
                    .build(),
            )
            .build();
        self.collection(INVOICES)
            .create_index(invoice_list, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create tenant list index on invoices: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on invoices.(tenant_id, created_at)");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDb {
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        self.collection(collection)
            .find_one(filter, None)
            .await
            .map_err(AppError::from)
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<Document>, AppError> {
        let mut cursor = self
            .collection(collection)
            .find(filter, None)
            .await
            .map_err(AppError::from)?;

        let mut documents = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(AppError::from)? {
            documents.push(doc);
        }
        Ok(documents)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), AppError> {
        self.collection(collection)
            .insert_one(document, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<u64, AppError> {
        let options = UpdateOptions::builder().upsert(upsert).build();
        let result = self
            .collection(collection)
            .update_one(filter, update, options)
            .await
            .map_err(AppError::from)?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        let result = self
            .collection(collection)
            .delete_one(filter, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count)
    }

    async fn count_documents(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        self.collection(collection)
            .count_documents(filter, None)
            .await
            .map_err(AppError::from)
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::Before)
            .build();
        self.collection(collection)
            .find_one_and_update(filter, update, options)
            .await
            .map_err(AppError::from)
    }
}
