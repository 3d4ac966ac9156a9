use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use trendwatch_core::domain::deliverable::DeliverableRecord;
use trendwatch_core::domain::digest::DigestSnapshot;
use trendwatch_core::domain::opportunity::{Opportunity, OpportunityId};

pub mod file;
pub mod memory;

pub use file::FileDigestStore;
pub use memory::InMemoryDigestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no opportunities saved for digest {digest_date} (expected `{}`)", path.display())]
    DigestNotFound { digest_date: String, path: PathBuf },
    #[error("opportunity {opp_id} not found in digest {digest_date}")]
    OpportunityNotFound { digest_date: String, opp_id: OpportunityId },
    #[error("io error on `{}`: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("decode error: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DigestNotFound { .. } | Self::OpportunityNotFound { .. })
    }
}

/// Persists digest snapshots keyed by date and the deliverables generated
/// from them.
#[async_trait]
pub trait DigestStore: Send + Sync {
    /// Writes the snapshot, replacing any earlier one for the same date.
    async fn save_snapshot(&self, snapshot: &DigestSnapshot) -> Result<(), StoreError>;

    async fn load_snapshot(&self, digest_date: &str) -> Result<DigestSnapshot, StoreError>;

    async fn load_opportunity(
        &self,
        digest_date: &str,
        opp_id: &OpportunityId,
    ) -> Result<Opportunity, StoreError> {
        let snapshot = self.load_snapshot(digest_date).await?;
        snapshot.opportunities.get(opp_id).cloned().ok_or_else(|| {
            StoreError::OpportunityNotFound { digest_date: digest_date.to_owned(), opp_id: opp_id.clone() }
        })
    }

    /// Attaches the posted message reference; opportunities are left untouched.
    async fn record_message_ts(
        &self,
        digest_date: &str,
        digest_message_ts: &str,
    ) -> Result<DigestSnapshot, StoreError> {
        let snapshot = self.load_snapshot(digest_date).await?.with_message_ts(digest_message_ts);
        self.save_snapshot(&snapshot).await?;
        Ok(snapshot)
    }

    async fn save_deliverable(&self, record: &DeliverableRecord) -> Result<PathBuf, StoreError>;
}
