// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule record store behind a repository trait.
//!
//! The store is an explicit collaborator injected into the router state.
//! The in-memory implementation is the only backend; durability is out of
//! scope and the trait is the seam where a persistent store would plug in.

use acc_4d_core::{DbId, ScheduleRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// Store errors. The in-memory backend never fails, but the trait keeps
/// the error channel open for real backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A schedule record as held by the store: the record itself plus the
/// store-assigned id and the last write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(flatten)]
    pub record: ScheduleRecord,
    #[serde(rename = "recordId")]
    pub record_id: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

impl StoredRecord {
    /// Wrap a record, assigning the store id and stamping the write time.
    pub fn new(record: ScheduleRecord) -> Self {
        let record_id = format!(
            "4D-{}-{}",
            record.element_id,
            Utc::now().timestamp_millis()
        );
        Self {
            record,
            record_id,
            last_updated: Utc::now(),
        }
    }
}

/// Async repository interface over schedule records, keyed by element id.
/// One record per element; saving again overwrites.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn save(&self, record: StoredRecord) -> StoreResult<()>;
    async fn get(&self, element_id: DbId) -> StoreResult<Option<StoredRecord>>;
    async fn list(&self) -> StoreResult<Vec<StoredRecord>>;
    async fn delete(&self, element_id: DbId) -> StoreResult<bool>;
    async fn count(&self) -> StoreResult<usize>;
}

/// Process-lifetime in-memory repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: RwLock<FxHashMap<DbId, StoredRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleRepository for MemoryRepository {
    async fn save(&self, record: StoredRecord) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(record.record.element_id, record);
        Ok(())
    }

    async fn get(&self, element_id: DbId) -> StoreResult<Option<StoredRecord>> {
        Ok(self.records.read().await.get(&element_id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<StoredRecord>> {
        let mut records: Vec<StoredRecord> =
            self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.record.element_id);
        Ok(records)
    }

    async fn delete(&self, element_id: DbId) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(&element_id).is_some())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(element_id: DbId) -> StoredRecord {
        StoredRecord::new(ScheduleRecord::new(element_id, format!("e{element_id}")))
    }

    #[tokio::test]
    async fn save_get_delete_cycle() {
        let repo = MemoryRepository::new();
        repo.save(record(7)).await.unwrap();

        let fetched = repo.get(7).await.unwrap().unwrap();
        assert_eq!(fetched.record.element_name, "e7");
        assert!(fetched.record_id.starts_with("4D-7-"));
        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.delete(7).await.unwrap());
        assert!(!repo.delete(7).await.unwrap());
        assert!(repo.get(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_per_element() {
        let repo = MemoryRepository::new();
        repo.save(record(1)).await.unwrap();

        let mut second = record(1);
        second.record.progress = 55;
        repo.save(second).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get(1).await.unwrap().unwrap().record.progress, 55);
    }

    #[tokio::test]
    async fn list_is_sorted_by_element_id() {
        let repo = MemoryRepository::new();
        repo.save(record(30)).await.unwrap();
        repo.save(record(10)).await.unwrap();
        repo.save(record(20)).await.unwrap();

        let ids: Vec<DbId> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|r| r.record.element_id)
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn stored_record_serializes_flat() {
        let stored = record(42);
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["elementId"], 42);
        assert!(json["recordId"].as_str().unwrap().starts_with("4D-42-"));
        assert!(json.get("lastUpdated").is_some());
    }
}
