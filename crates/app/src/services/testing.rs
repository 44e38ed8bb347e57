//! In-memory [`Storage`] used by the service tests.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use hbnb_domain::error::HbnbError;
use hbnb_domain::record::{Kind, Record, RecordKey};

use crate::ports::{Objects, Storage};

#[derive(Default)]
pub(crate) struct InMemoryStorage {
    objects: Mutex<Objects>,
    saves: AtomicUsize,
}

impl InMemoryStorage {
    /// Number of times `save` was called.
    pub(crate) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Storage for InMemoryStorage {
    fn all(&self, kind: Option<Kind>) -> impl Future<Output = Result<Objects, HbnbError>> + Send {
        let store = self.objects.lock().unwrap();
        let result: Objects = store
            .iter()
            .filter(|(key, _)| kind.is_none_or(|kind| key.kind == kind))
            .map(|(key, record)| (*key, record.clone()))
            .collect();
        async { Ok(result) }
    }

    fn get(
        &self,
        key: RecordKey,
    ) -> impl Future<Output = Result<Option<Record>, HbnbError>> + Send {
        let store = self.objects.lock().unwrap();
        let result = store.get(&key).cloned();
        async { Ok(result) }
    }

    fn stage(&self, record: Record) -> impl Future<Output = Result<(), HbnbError>> + Send {
        let mut store = self.objects.lock().unwrap();
        store.insert(record.key(), record);
        async { Ok(()) }
    }

    fn save(&self) -> impl Future<Output = Result<(), HbnbError>> + Send {
        self.saves.fetch_add(1, Ordering::SeqCst);
        async { Ok(()) }
    }

    fn delete(&self, key: RecordKey) -> impl Future<Output = Result<(), HbnbError>> + Send {
        let mut store = self.objects.lock().unwrap();
        store.remove(&key);
        async { Ok(()) }
    }

    fn close(&self) -> impl Future<Output = Result<(), HbnbError>> + Send {
        async { Ok(()) }
    }
}
