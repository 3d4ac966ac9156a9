use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::RwLock;

use trendwatch_core::domain::deliverable::DeliverableRecord;
use trendwatch_core::domain::digest::{snapshot_file_name, DigestSnapshot};

use super::{DigestStore, StoreError};

#[derive(Default)]
pub struct InMemoryDigestStore {
    snapshots: RwLock<HashMap<String, DigestSnapshot>>,
    deliverables: RwLock<Vec<DeliverableRecord>>,
}

impl InMemoryDigestStore {
    pub async fn deliverables(&self) -> Vec<DeliverableRecord> {
        self.deliverables.read().await.clone()
    }
}

#[async_trait::async_trait]
impl DigestStore for InMemoryDigestStore {
    async fn save_snapshot(&self, snapshot: &DigestSnapshot) -> Result<(), StoreError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(snapshot.digest_date.clone(), snapshot.clone());
        Ok(())
    }

    async fn load_snapshot(&self, digest_date: &str) -> Result<DigestSnapshot, StoreError> {
        let snapshots = self.snapshots.read().await;
        snapshots.get(digest_date).cloned().ok_or_else(|| StoreError::DigestNotFound {
            digest_date: digest_date.to_owned(),
            path: PathBuf::from(snapshot_file_name(digest_date)),
        })
    }

    async fn save_deliverable(&self, record: &DeliverableRecord) -> Result<PathBuf, StoreError> {
        let mut deliverables = self.deliverables.write().await;
        deliverables.push(record.clone());
        Ok(PathBuf::from(record.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use trendwatch_core::domain::digest::DigestSnapshot;
    use trendwatch_core::domain::opportunity::{
        Category, Opportunity, OpportunityId, OpportunityMap,
    };

    use crate::repositories::{DigestStore, InMemoryDigestStore, StoreError};

    fn snapshot(digest_date: &str, title: &str) -> DigestSnapshot {
        let mut opportunities = OpportunityMap::new();
        opportunities.insert(
            OpportunityId::new(Category::Homelab, 1),
            Opportunity { title: title.to_owned(), ..Opportunity::default() },
        );
        DigestSnapshot::new(digest_date, opportunities)
    }

    #[tokio::test]
    async fn in_memory_snapshot_round_trip() {
        let store = InMemoryDigestStore::default();
        let saved = snapshot("2026-02-02", "Local LLM Fine-tuning");

        store.save_snapshot(&saved).await.expect("save snapshot");
        let found = store.load_snapshot("2026-02-02").await.expect("load snapshot");

        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn later_save_replaces_the_date() {
        let store = InMemoryDigestStore::default();
        store.save_snapshot(&snapshot("2026-02-02", "first")).await.expect("save first");
        store.save_snapshot(&snapshot("2026-02-02", "second")).await.expect("save second");

        let found = store
            .load_opportunity("2026-02-02", &OpportunityId::new(Category::Homelab, 1))
            .await
            .expect("load opportunity");
        assert_eq!(found.title, "second");
    }

    #[tokio::test]
    async fn unknown_date_is_not_found() {
        let store = InMemoryDigestStore::default();
        let result = store.load_snapshot("1999-01-01").await;

        assert!(matches!(result, Err(StoreError::DigestNotFound { .. })));
        assert!(store.record_message_ts("1999-01-01", "1.0").await.is_err());
    }
}
