use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use trendwatch_core::domain::deliverable::DeliverableRecord;
use trendwatch_core::domain::digest::{snapshot_file_name, DigestSnapshot};

use super::{DigestStore, StoreError};

/// Pretty-printed JSON files in a single output directory.
#[derive(Clone, Debug)]
pub struct FileDigestStore {
    output_dir: PathBuf,
}

impl FileDigestStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn snapshot_path(&self, digest_date: &str) -> PathBuf {
        self.output_dir.join(snapshot_file_name(digest_date))
    }

    async fn write_json(&self, path: &Path, body: String) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| StoreError::Io { path: self.output_dir.clone(), source })?;
        tokio::fs::write(path, body)
            .await
            .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })
    }
}

#[async_trait]
impl DigestStore for FileDigestStore {
    async fn save_snapshot(&self, snapshot: &DigestSnapshot) -> Result<(), StoreError> {
        let path = self.snapshot_path(&snapshot.digest_date);
        let body = serde_json::to_string_pretty(snapshot)
            .map_err(|error| StoreError::Decode(error.to_string()))?;
        self.write_json(&path, body).await?;

        info!(
            event_name = "digest.snapshot.saved",
            digest_date = %snapshot.digest_date,
            opportunity_count = snapshot.opportunities.len(),
            path = %path.display(),
            "saved digest snapshot"
        );
        Ok(())
    }

    async fn load_snapshot(&self, digest_date: &str) -> Result<DigestSnapshot, StoreError> {
        let path = self.snapshot_path(digest_date);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(StoreError::DigestNotFound { digest_date: digest_date.to_owned(), path })
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let snapshot = serde_json::from_str::<DigestSnapshot>(&raw).map_err(|error| {
            StoreError::Decode(format!("`{}`: {error}", path.display()))
        })?;

        debug!(
            event_name = "digest.snapshot.loaded",
            digest_date = %digest_date,
            opportunity_count = snapshot.opportunities.len(),
            "loaded digest snapshot"
        );
        Ok(snapshot)
    }

    async fn save_deliverable(&self, record: &DeliverableRecord) -> Result<PathBuf, StoreError> {
        let path = self.output_dir.join(record.file_name());
        let body = serde_json::to_string_pretty(record)
            .map_err(|error| StoreError::Decode(error.to_string()))?;
        self.write_json(&path, body).await?;

        info!(
            event_name = "deliverable.saved",
            digest_date = %record.digest_date,
            opportunity_id = %record.opportunity_id,
            deliverable_type = %record.deliverable_type,
            path = %path.display(),
            "saved deliverable"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use trendwatch_core::domain::approval::DeliverableType;
    use trendwatch_core::domain::deliverable::{DeliverableRecord, DeliverableRequest};
    use trendwatch_core::domain::digest::DigestSnapshot;
    use trendwatch_core::domain::opportunity::{
        Category, Opportunity, OpportunityId, OpportunityMap,
    };

    use super::FileDigestStore;
    use crate::repositories::{DigestStore, StoreError};

    fn snapshot(digest_date: &str) -> DigestSnapshot {
        let mut opportunities = OpportunityMap::new();
        opportunities.insert(
            OpportunityId::new(Category::Homelab, 1),
            Opportunity {
                title: "Local LLM Fine-tuning".to_owned(),
                full_text: "Local LLM Fine-tuning\n**Relevance:** AI Box".to_owned(),
                relevance: "AI Box".to_owned(),
                signal: "New LoRA tooling".to_owned(),
                next_steps: "Try it on the GPU node".to_owned(),
            },
        );
        opportunities.insert(
            OpportunityId::new(Category::Work, 1),
            Opportunity { title: "Code Review Patterns".to_owned(), ..Opportunity::default() },
        );
        DigestSnapshot::new(digest_date, opportunities)
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_disk() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileDigestStore::new(dir.path().join("output"));
        let saved = snapshot("2026-02-02");

        store.save_snapshot(&saved).await.expect("save snapshot");
        assert!(dir.path().join("output/opportunities_2026-02-02.json").exists());

        let loaded = store.load_snapshot("2026-02-02").await.expect("load snapshot");
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn snapshot_file_keeps_ids_as_keys_in_field_order() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileDigestStore::new(dir.path());
        store.save_snapshot(&snapshot("2026-02-02")).await.expect("save snapshot");

        let raw = std::fs::read_to_string(store.snapshot_path("2026-02-02")).expect("read file");
        let date_at = raw.find("\"digest_date\"").expect("digest_date");
        let ts_at = raw.find("\"digest_message_ts\"").expect("digest_message_ts");
        let created_at = raw.find("\"created_at\"").expect("created_at");
        let opportunities_at = raw.find("\"opportunities\"").expect("opportunities");
        assert!(date_at < ts_at && ts_at < created_at && created_at < opportunities_at);
        assert!(raw.find("\"H1\": {").expect("H1 key") < raw.find("\"W1\": {").expect("W1 key"));
        assert!(raw.contains("\n  \"digest_date\""));
    }

    #[tokio::test]
    async fn reads_files_written_without_message_ts() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(
            dir.path().join("opportunities_2026-01-05.json"),
            r#"{
  "digest_date": "2026-01-05",
  "created_at": "2026-01-05T07:00:12.345678",
  "opportunities": {
    "W2": {"title": "Edge Caching", "full_text": "Edge Caching", "relevance": "", "signal": "", "next_steps": ""}
  }
}"#,
        )
        .expect("write fixture");

        let store = FileDigestStore::new(dir.path());
        let loaded = store.load_snapshot("2026-01-05").await.expect("load snapshot");
        assert_eq!(loaded.digest_message_ts, "");
        assert_eq!(
            loaded.opportunities[&OpportunityId::new(Category::Work, 2)].title,
            "Edge Caching"
        );
    }

    #[tokio::test]
    async fn missing_digest_and_missing_opportunity_are_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileDigestStore::new(dir.path());

        let missing = store.load_snapshot("2026-03-01").await;
        assert!(matches!(
            missing,
            Err(StoreError::DigestNotFound { ref digest_date, .. }) if digest_date == "2026-03-01"
        ));

        store.save_snapshot(&snapshot("2026-03-01")).await.expect("save snapshot");
        let opp_id = OpportunityId::new(Category::Homelab, 9);
        let error = store.load_opportunity("2026-03-01", &opp_id).await.expect_err("missing id");
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "opportunity H9 not found in digest 2026-03-01");

        let found = store
            .load_opportunity("2026-03-01", &OpportunityId::new(Category::Homelab, 1))
            .await
            .expect("existing id");
        assert_eq!(found.relevance, "AI Box");
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_a_decode_error() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("opportunities_2026-03-02.json"), "{not json")
            .expect("write fixture");

        let store = FileDigestStore::new(dir.path());
        let result = store.load_snapshot("2026-03-02").await;
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[tokio::test]
    async fn record_message_ts_preserves_opportunities() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileDigestStore::new(dir.path());
        let saved = snapshot("2026-02-02");
        store.save_snapshot(&saved).await.expect("save snapshot");

        let updated =
            store.record_message_ts("2026-02-02", "1738483200.000100").await.expect("record ts");
        let reloaded = store.load_snapshot("2026-02-02").await.expect("reload");

        assert_eq!(updated, reloaded);
        assert_eq!(reloaded.digest_message_ts, "1738483200.000100");
        assert_eq!(reloaded.opportunities, saved.opportunities);
    }

    #[tokio::test]
    async fn deliverable_is_written_under_catalyst_name() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileDigestStore::new(dir.path());
        let request = DeliverableRequest {
            digest_date: "2026-02-02".to_owned(),
            opp_id: OpportunityId::new(Category::Work, 1),
            deliverable_type: DeliverableType::Brief,
            opportunity: Opportunity { title: "Code Review Patterns".to_owned(), ..Opportunity::default() },
        };
        let record = DeliverableRecord::new(request, "# Leadership Brief");

        let path = store.save_deliverable(&record).await.expect("save deliverable");
        assert_eq!(path, dir.path().join("catalyst_2026-02-02_W1_brief.json"));

        let raw = std::fs::read_to_string(path).expect("read deliverable");
        let decoded: DeliverableRecord = serde_json::from_str(&raw).expect("decode deliverable");
        assert_eq!(decoded, record);
        assert!(raw.contains("\"context_used\": {\n    \"type\": \"work\"\n  }"));
    }
}
