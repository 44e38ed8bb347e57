//! Stats service: record counts per collection.

use std::collections::BTreeMap;
use std::sync::Arc;

use hbnb_domain::error::HbnbError;
use hbnb_domain::record::Kind;

use crate::ports::Storage;

/// Application service reporting how many records each collection holds.
pub struct StatsService<S> {
    storage: Arc<S>,
}

impl<S: Storage> StatsService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Count of every kind, keyed by collection name (`"amenities"`, `"cities"`, …).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn counts(&self) -> Result<BTreeMap<&'static str, usize>, HbnbError> {
        let mut counts = BTreeMap::new();
        for kind in Kind::ALL {
            counts.insert(kind.collection(), self.storage.count(Some(kind)).await?);
        }
        Ok(counts)
    }
}
