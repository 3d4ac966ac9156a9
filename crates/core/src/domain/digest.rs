use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::opportunity::{Category, OpportunityMap};

/// One digest run: the opportunity mapping plus the metadata it is persisted
/// with. A new run produces a new snapshot; existing ones are only replaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestSnapshot {
    pub digest_date: String,
    /// Reference to the posted digest message, filled in once it is sent.
    #[serde(default)]
    pub digest_message_ts: String,
    pub created_at: NaiveDateTime,
    pub opportunities: OpportunityMap,
}

impl DigestSnapshot {
    pub fn new(digest_date: impl Into<String>, opportunities: OpportunityMap) -> Self {
        Self {
            digest_date: digest_date.into(),
            digest_message_ts: String::new(),
            created_at: Local::now().naive_local(),
            opportunities,
        }
    }

    /// Merges the homelab and work extractions of one run.
    pub fn combine(
        digest_date: impl Into<String>,
        homelab: OpportunityMap,
        work: OpportunityMap,
    ) -> Self {
        let mut opportunities = homelab;
        opportunities.extend(work);
        Self::new(digest_date, opportunities)
    }

    pub fn with_message_ts(mut self, digest_message_ts: impl Into<String>) -> Self {
        self.digest_message_ts = digest_message_ts.into();
        self
    }

    pub fn count_for(&self, category: Category) -> usize {
        self.opportunities.keys().filter(|id| id.category() == category).count()
    }
}

/// File name of the persisted mapping for one digest date.
pub fn snapshot_file_name(digest_date: &str) -> String {
    format!("opportunities_{digest_date}.json")
}
