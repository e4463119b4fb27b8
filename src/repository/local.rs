//! Local JSON store: one blob file per key under the data directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{record_id, seed, Collection, CollectionStore};
use crate::error::{AppError, AppResult};

pub struct LocalStore {
    dir: PathBuf,
    sample_data: bool,
    /// Serializes read-modify-write cycles across all keys
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Open the store, creating the data directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::Storage(format!("Cannot create data directory {}: {}", dir.display(), e))
        })?;
        Ok(Self {
            dir,
            sample_data: true,
            write_lock: Mutex::new(()),
        })
    }

    /// Whether a missing collection blob starts out with the sample records
    pub fn with_sample_data(mut self, enabled: bool) -> Self {
        self.sample_data = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn initial_rows(&self, collection: Collection) -> Vec<Value> {
        if self.sample_data {
            seed::sample_rows(collection)
        } else {
            Vec::new()
        }
    }

    /// Read a blob. `None` when it has never been written.
    pub async fn read_blob<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let path = self.blob_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Storage(format!("Cannot read {}: {}", path.display(), e))),
        };
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Storage(format!("Corrupt blob {}: {}", key, e)))?;
        Ok(Some(value))
    }

    /// Replace a blob
    pub async fn write_blob<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_unlocked(key, value).await
    }

    pub async fn remove_blob(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(self.blob_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_unlocked<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let path = self.blob_path(key);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Load a blob (or `init()` when absent), apply `f`, and write it back.
    /// Nothing is written when `f` fails.
    pub async fn modify<T, R, I, F>(&self, key: &str, init: I, f: F) -> AppResult<R>
    where
        T: Serialize + DeserializeOwned,
        I: FnOnce() -> T,
        F: FnOnce(&mut T) -> AppResult<R>,
    {
        let _guard = self.write_lock.lock().await;
        let mut value = match self.read_blob::<T>(key).await? {
            Some(value) => value,
            None => init(),
        };
        let result = f(&mut value)?;
        self.write_unlocked(key, &value).await?;
        Ok(result)
    }

    /// Overwrite a whole collection (backup restore)
    pub async fn replace_collection(&self, collection: Collection, rows: &[Value]) -> AppResult<()> {
        self.write_blob(collection.as_str(), rows).await
    }
}

#[async_trait]
impl CollectionStore for LocalStore {
    async fn list(&self, collection: Collection) -> AppResult<Vec<Value>> {
        Ok(self
            .read_blob(collection.as_str())
            .await?
            .unwrap_or_else(|| self.initial_rows(collection)))
    }

    async fn create(&self, collection: Collection, record: Value) -> AppResult<Value> {
        let id = record_id(&record)
            .ok_or_else(|| AppError::Validation(format!("{} record has no id", collection)))?;
        let stored = record.clone();
        self.modify(
            collection.as_str(),
            || self.initial_rows(collection),
            |rows: &mut Vec<Value>| {
                if rows.iter().any(|row| record_id(row).as_deref() == Some(id.as_str())) {
                    return Err(AppError::Conflict(format!(
                        "{} record {} already exists",
                        collection, id
                    )));
                }
                // Newest first
                rows.insert(0, stored);
                Ok(())
            },
        )
        .await?;
        Ok(record)
    }

    async fn update(&self, collection: Collection, record: Value) -> AppResult<Value> {
        let id = record_id(&record)
            .ok_or_else(|| AppError::Validation(format!("{} record has no id", collection)))?;
        let stored = record.clone();
        self.modify(
            collection.as_str(),
            || self.initial_rows(collection),
            |rows: &mut Vec<Value>| {
                let slot = rows
                    .iter_mut()
                    .find(|row| record_id(row).as_deref() == Some(id.as_str()))
                    .ok_or_else(|| AppError::NotFound(format!("{} record {} not found", collection, id)))?;
                *slot = stored;
                Ok(())
            },
        )
        .await?;
        Ok(record)
    }

    async fn delete(&self, collection: Collection, id: &str) -> AppResult<()> {
        self.modify(
            collection.as_str(),
            || self.initial_rows(collection),
            |rows: &mut Vec<Value>| {
                let before = rows.len();
                rows.retain(|row| record_id(row).as_deref() != Some(id));
                if rows.len() == before {
                    return Err(AppError::NotFound(format!("{} record {} not found", collection, id)));
                }
                Ok(())
            },
        )
        .await
    }
}
