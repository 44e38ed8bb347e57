//! JSON file implementation of [`Storage`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hbnb_app::ports::{Objects, Storage};
use hbnb_domain::error::HbnbError;
use hbnb_domain::record::{Kind, Record, RecordKey};
use tokio::sync::RwLock;

use crate::error::StorageError;

/// Storage backed by a single JSON document.
pub struct FileStorage {
    path: PathBuf,
    objects: RwLock<Objects>,
}

impl FileStorage {
    /// Open the store at `path`, loading it if the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let objects = load(&path).await?;
        tracing::debug!(path = %path.display(), count = objects.len(), "file storage loaded");
        Ok(Self {
            path,
            objects: RwLock::new(objects),
        })
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn load(path: &Path) -> Result<Objects, StorageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Objects::new()),
        Err(err) => return Err(StorageError::io(path, err)),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Objects::new());
    }
    Ok(serde_json::from_slice(&bytes)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Storage for FileStorage {
    async fn all(&self, kind: Option<Kind>) -> Result<Objects, HbnbError> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter(|(key, _)| kind.is_none_or(|kind| key.kind == kind))
            .map(|(key, record)| (*key, record.clone()))
            .collect())
    }

    async fn get(&self, key: RecordKey) -> Result<Option<Record>, HbnbError> {
        Ok(self.objects.read().await.get(&key).cloned())
    }

    async fn count(&self, kind: Option<Kind>) -> Result<usize, HbnbError> {
        let objects = self.objects.read().await;
        Ok(match kind {
            Some(kind) => objects.keys().filter(|key| key.kind == kind).count(),
            None => objects.len(),
        })
    }

    async fn stage(&self, record: Record) -> Result<(), HbnbError> {
        self.objects.write().await.insert(record.key(), record);
        Ok(())
    }

    async fn save(&self) -> Result<(), HbnbError> {
        // the write lock also serializes concurrent saves on the temp file
        let objects = self.objects.write().await;
        let document = serde_json::to_vec(&*objects).map_err(StorageError::from)?;

        let temp = temp_path(&self.path);
        tokio::fs::write(&temp, document)
            .await
            .map_err(|err| StorageError::io(&temp, err))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|err| StorageError::io(&self.path, err))?;
        tracing::debug!(path = %self.path.display(), count = objects.len(), "file storage saved");
        Ok(())
    }

    async fn delete(&self, key: RecordKey) -> Result<(), HbnbError> {
        self.objects.write().await.remove(&key);
        Ok(())
    }

    async fn close(&self) -> Result<(), HbnbError> {
        let reloaded = load(&self.path).await?;
        *self.objects.write().await = reloaded;
        Ok(())
    }
}
