use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

/// The loosely-typed field payload of a document, as stored in the backing
/// collection. Typed collection schemas are applied at the handler boundary.
pub type Fields = Map<String, Value>;

/// StoreError
///
/// Failures surfaced by a concrete store implementation. Read-path callers
/// (via `FallbackStore`) recover from these; write-path callers surface them
/// as a 500-equivalent `ApiError::Store`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A stored row whose payload is not a JSON object. Should never happen
    /// since every write path stores an object.
    #[error("corrupt document in '{0}'")]
    Corrupt(String),
}

/// Document
///
/// One record in a named collection: a generated identifier, the flat field
/// mapping, and the creation/modification timestamps maintained by the store.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Flattens the document into a single JSON object: the stored fields plus
    /// `id`, `created_at` and `updated_at`. This is the wire shape of every
    /// record, and what the typed collection schemas deserialize from.
    pub fn into_value(self) -> Value {
        let mut obj = self.fields;
        obj.insert("id".to_string(), Value::String(self.id.to_string()));
        obj.insert(
            "created_at".to_string(),
            Value::String(self.created_at.to_rfc3339()),
        );
        obj.insert(
            "updated_at".to_string(),
            Value::String(self.updated_at.to_rfc3339()),
        );
        Value::Object(obj)
    }
}

/// SortOrder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// ListQuery
///
/// The filtering contract of `DocumentStore::list`: equality filters over
/// document fields, a single sort key, and a truncating limit. No pagination
/// cursor. Free-text search is not a store concern; endpoints that need it
/// post-filter the returned records.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Fields,
    pub order_by: Option<(String, SortOrder)>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality filter on a document field.
    pub fn filter(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.filters.insert(key.to_string(), value.into());
        self
    }

    /// Adds an equality filter only when the (query-string) value is present.
    pub fn maybe_filter(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(v) = value {
            self.filters.insert(key.to_string(), v.into());
        }
        self
    }

    /// Sets the sort key. `created_at` and `updated_at` sort on the record
    /// timestamps; any other key sorts on the field value.
    pub fn order_by(mut self, key: &str, order: SortOrder) -> Self {
        self.order_by = Some((key.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }
}

/// DocumentStore Trait
///
/// Defines the abstract contract for all persistence operations over named
/// collections. This is the core of the store abstraction: handlers interact
/// with the data layer without knowing the concrete implementation (Postgres,
/// in-memory, or the fallback composition of both).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn DocumentStore>`) safely shareable and usable across Axum's
/// asynchronous task boundaries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists records matching the query's equality filters, sorted by its
    /// single sort key (default: newest first), truncated to its limit.
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError>;

    /// Fetches one record by identifier.
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Inserts a new record under a freshly generated identifier, stamping
    /// creation/modification times. Returns the stored record.
    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Shallow-merges the given fields into an existing record and bumps its
    /// modification time. Returns `None` if the identifier is absent.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Fields,
    ) -> Result<Option<Document>, StoreError>;

    /// Merge-or-create at a fixed identifier. Exists for singleton records
    /// (site settings) that are merged, never replaced.
    async fn upsert(&self, collection: &str, id: Uuid, fields: Fields)
    -> Result<Document, StoreError>;

    /// Removes a record. Returns true if a record was actually deleted.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;

    /// Number of records in a collection (dashboard stats).
    async fn count(&self, collection: &str) -> Result<i64, StoreError>;
}

/// StoreState
///
/// The concrete type used to share the persistence layer across the application state.
pub type StoreState = Arc<dyn DocumentStore>;

// --- Postgres Implementation ---

/// PostgresStore
///
/// The real document store, backed by a single JSONB `documents` table keyed by
/// (collection, id). Schema-flexible by construction: the typed collection
/// schemas live at the handler boundary, not in the database.
pub struct PostgresStore {
    pool: PgPool,
}

/// Row shape shared by every documents-table query.
#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_document(self, collection: &str) -> Result<Document, StoreError> {
        match self.data {
            Value::Object(fields) => Ok(Document {
                id: self.id,
                fields,
                created_at: self.created_at,
                updated_at: self.updated_at,
            }),
            _ => Err(StoreError::Corrupt(collection.to_string())),
        }
    }
}

const RETURNING: &str = " RETURNING id, data, created_at, updated_at";

impl PostgresStore {
    /// Creates a new store instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// ensure_schema
    ///
    /// Creates the backing table if it does not exist. Idempotent, safe to call
    /// at every startup (the local Docker database starts empty).
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id UUID NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    /// list
    ///
    /// Implements flexible filtering using QueryBuilder for safe parameterization.
    /// Equality filters compile to a single JSONB containment check; the sort key
    /// maps to the timestamp columns or a `data->>` text extraction.
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT id, data, created_at, updated_at FROM documents WHERE collection = ");
        builder.push_bind(collection);

        if !query.filters.is_empty() {
            builder.push(" AND data @> ");
            builder.push_bind(Value::Object(query.filters.clone()));
        }

        match &query.order_by {
            Some((key, order)) => {
                match key.as_str() {
                    "created_at" => {
                        builder.push(" ORDER BY created_at");
                    }
                    "updated_at" => {
                        builder.push(" ORDER BY updated_at");
                    }
                    _ => {
                        builder.push(" ORDER BY data->>");
                        builder.push_bind(key.clone());
                    }
                };
                builder.push(match order {
                    SortOrder::Asc => " ASC",
                    SortOrder::Desc => " DESC",
                });
            }
            None => {
                builder.push(" ORDER BY created_at DESC");
            }
        }

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }

        let rows = builder
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| row.into_document(collection))
            .collect()
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data, created_at, updated_at FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_document(collection)).transpose()
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let id = Uuid::new_v4();
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3){RETURNING}"
        ))
        .bind(collection)
        .bind(id)
        .bind(Value::Object(fields))
        .fetch_one(&self.pool)
        .await?;

        row.into_document(collection)
    }

    /// update
    ///
    /// Shallow JSONB merge (`data || $3`). Affects zero rows when the identifier
    /// is absent, which surfaces as `None` (a 404 at the handler layer).
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Fields,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "UPDATE documents SET data = data || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2{RETURNING}"
        ))
        .bind(collection)
        .bind(id)
        .bind(Value::Object(fields))
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_document(collection)).transpose()
    }

    /// upsert
    ///
    /// Merge-or-create at a fixed identity, in one statement. `ON CONFLICT`
    /// keeps the operation idempotent under concurrent settings updates.
    async fn upsert(
        &self,
        collection: &str,
        id: Uuid,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE \
             SET data = documents.data || EXCLUDED.data, updated_at = NOW(){RETURNING}"
        ))
        .bind(collection)
        .bind(id)
        .bind(Value::Object(fields))
        .fetch_one(&self.pool)
        .await?;

        row.into_document(collection)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: &str) -> Result<i64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

// --- In-Memory Implementation ---

/// MemoryStore
///
/// A mutex-guarded map of collections, implementing the same trait as the real
/// store. Serves two roles: the hermetic store for unit and integration tests,
/// and the read-path fallback inside `FallbackStore`. Critical sections only
/// cover map access; the lock is never held across an await point.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, HashMap<Uuid, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors an externally created document into the map, preserving its
    /// identifier and timestamps. Used by `FallbackStore` to keep the fallback
    /// data in step with the primary store.
    fn put(&self, collection: &str, doc: Document) {
        let mut map = self.collections.lock().expect("memory store poisoned");
        map.entry(collection.to_string())
            .or_default()
            .insert(doc.id, doc);
    }

    fn forget(&self, collection: &str, id: Uuid) {
        let mut map = self.collections.lock().expect("memory store poisoned");
        if let Some(docs) = map.get_mut(collection) {
            docs.remove(&id);
        }
    }

    fn matches(doc: &Document, filters: &Fields) -> bool {
        filters
            .iter()
            .all(|(key, expected)| doc.fields.get(key) == Some(expected))
    }

    /// Sort-key projection: timestamps for the bookkeeping keys, the raw field
    /// value otherwise.
    fn sort_value(doc: &Document, key: &str) -> Value {
        match key {
            "created_at" => Value::String(doc.created_at.to_rfc3339()),
            "updated_at" => Value::String(doc.updated_at.to_rfc3339()),
            _ => doc.fields.get(key).cloned().unwrap_or(Value::Null),
        }
    }
}

/// Total order over JSON values for in-memory sorting. Only needs to agree
/// with Postgres on the cases the endpoints actually sort by (timestamps and
/// scalar fields); mixed-type collections compare by type rank.
fn value_cmp(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError> {
        let mut docs: Vec<Document> = {
            let map = self.collections.lock().expect("memory store poisoned");
            map.get(collection)
                .map(|docs| {
                    docs.values()
                        .filter(|doc| Self::matches(doc, &query.filters))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        let (key, order) = query
            .order_by
            .clone()
            .unwrap_or(("created_at".to_string(), SortOrder::Desc));
        docs.sort_by(|a, b| {
            let ordering = value_cmp(&Self::sort_value(a, &key), &Self::sort_value(b, &key));
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        if let Some(limit) = query.limit {
            docs.truncate(limit.max(0) as usize);
        }
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let map = self.collections.lock().expect("memory store poisoned");
        Ok(map.get(collection).and_then(|docs| docs.get(&id)).cloned())
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        };
        self.put(collection, doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Fields,
    ) -> Result<Option<Document>, StoreError> {
        let mut map = self.collections.lock().expect("memory store poisoned");
        let doc = match map.get_mut(collection).and_then(|docs| docs.get_mut(&id)) {
            Some(doc) => doc,
            None => return Ok(None),
        };
        doc.fields.extend(fields);
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn upsert(
        &self,
        collection: &str,
        id: Uuid,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        let mut map = self.collections.lock().expect("memory store poisoned");
        let now = Utc::now();
        let doc = map
            .entry(collection.to_string())
            .or_default()
            .entry(id)
            .or_insert_with(|| Document {
                id,
                fields: Fields::new(),
                created_at: now,
                updated_at: now,
            });
        doc.fields.extend(fields);
        doc.updated_at = now;
        Ok(doc.clone())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut map = self.collections.lock().expect("memory store poisoned");
        Ok(map
            .get_mut(collection)
            .and_then(|docs| docs.remove(&id))
            .is_some())
    }

    async fn count(&self, collection: &str) -> Result<i64, StoreError> {
        let map = self.collections.lock().expect("memory store poisoned");
        Ok(map.get(collection).map(|docs| docs.len()).unwrap_or(0) as i64)
    }
}

// --- Fallback Composition ---

/// FallbackStore
///
/// Wraps a primary store with an in-memory mirror. Reads that fail against the
/// primary are answered from the mirror (which tracks the last successfully
/// observed state); writes go to the primary only and surface their errors.
/// No retry, no partial-failure recovery, no cross-collection transactions.
pub struct FallbackStore {
    primary: Arc<dyn DocumentStore>,
    mirror: MemoryStore,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn DocumentStore>) -> Self {
        Self {
            primary,
            mirror: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for FallbackStore {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Document>, StoreError> {
        match self.primary.list(collection, query).await {
            Ok(docs) => {
                for doc in &docs {
                    self.mirror.put(collection, doc.clone());
                }
                Ok(docs)
            }
            Err(e) => {
                tracing::warn!("list fallback for '{}': {:?}", collection, e);
                self.mirror.list(collection, query).await
            }
        }
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        match self.primary.get(collection, id).await {
            Ok(found) => {
                if let Some(doc) = &found {
                    self.mirror.put(collection, doc.clone());
                }
                Ok(found)
            }
            Err(e) => {
                tracing::warn!("get fallback for '{}': {:?}", collection, e);
                self.mirror.get(collection, id).await
            }
        }
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let doc = self.primary.create(collection, fields).await?;
        self.mirror.put(collection, doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        fields: Fields,
    ) -> Result<Option<Document>, StoreError> {
        let updated = self.primary.update(collection, id, fields).await?;
        if let Some(doc) = &updated {
            self.mirror.put(collection, doc.clone());
        }
        Ok(updated)
    }

    async fn upsert(
        &self,
        collection: &str,
        id: Uuid,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        let doc = self.primary.upsert(collection, id, fields).await?;
        self.mirror.put(collection, doc.clone());
        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let deleted = self.primary.delete(collection, id).await?;
        if deleted {
            self.mirror.forget(collection, id);
        }
        Ok(deleted)
    }

    async fn count(&self, collection: &str) -> Result<i64, StoreError> {
        match self.primary.count(collection).await {
            Ok(n) => Ok(n),
            Err(e) => {
                tracing::warn!("count fallback for '{}': {:?}", collection, e);
                self.mirror.count(collection).await
            }
        }
    }
}
