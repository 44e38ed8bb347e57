//! Storage port: the façade every persistence backend implements.
//!
//! Handlers and services only ever talk to storage through this trait, so
//! the file-backed and SQL-backed adapters are interchangeable.
//!
//! Lifecycle of a write: [`Storage::stage`] (or [`Storage::delete`]) records
//! the change, [`Storage::save`] makes every pending change durable, and
//! [`Storage::close`] discards whatever was not saved. Staged changes are
//! visible to reads on the same storage before `save`.

use std::collections::BTreeMap;
use std::future::Future;

use hbnb_domain::error::HbnbError;
use hbnb_domain::record::{Kind, Model, Record, RecordKey};

/// Records keyed by `"Kind.id"`, in key order.
pub type Objects = BTreeMap<RecordKey, Record>;

/// Uniform access to persisted records regardless of backing medium.
pub trait Storage: Send + Sync {
    /// Every record, or only those of `kind`.
    fn all(&self, kind: Option<Kind>) -> impl Future<Output = Result<Objects, HbnbError>> + Send;

    /// A single record, if present.
    fn get(
        &self,
        key: RecordKey,
    ) -> impl Future<Output = Result<Option<Record>, HbnbError>> + Send;

    /// Number of records, or of records of `kind`. Always equals the size of
    /// [`Storage::all`] for the same filter.
    fn count(
        &self,
        kind: Option<Kind>,
    ) -> impl Future<Output = Result<usize, HbnbError>> + Send {
        async move { Ok(self.all(kind).await?.len()) }
    }

    /// Register a new or modified record for persistence.
    fn stage(&self, record: Record) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Flush every pending change durably.
    fn save(&self) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Remove a record. Removing an absent key is not an error.
    fn delete(&self, key: RecordKey) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Release the current session, discarding unsaved changes.
    fn close(&self) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Typed [`Storage::get`].
    fn find<M: Model>(
        &self,
        id: M::Id,
    ) -> impl Future<Output = Result<Option<M>, HbnbError>> + Send {
        async move {
            let record = self.get(RecordKey::new(M::KIND, id)).await?;
            Ok(record.and_then(M::from_record))
        }
    }

    /// Typed [`Storage::all`].
    fn list<M: Model>(&self) -> impl Future<Output = Result<Vec<M>, HbnbError>> + Send {
        async move {
            let objects = self.all(Some(M::KIND)).await?;
            Ok(objects.into_values().filter_map(M::from_record).collect())
        }
    }
}
