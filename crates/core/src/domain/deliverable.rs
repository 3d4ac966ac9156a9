use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::approval::{DeliverableType, ValidatedApproval};
use crate::domain::opportunity::{Category, Opportunity, OpportunityId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Homelab,
    Work,
}

impl From<Category> for ContextKind {
    fn from(category: Category) -> Self {
        match category {
            Category::Homelab => Self::Homelab,
            Category::Work => Self::Work,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextUsed {
    #[serde(rename = "type")]
    pub kind: ContextKind,
}

/// Input to deliverable generation for one approved opportunity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverableRequest {
    pub digest_date: String,
    pub opp_id: OpportunityId,
    pub deliverable_type: DeliverableType,
    pub opportunity: Opportunity,
}

impl DeliverableRequest {
    /// Dismissals carry no deliverable and yield `None`.
    pub fn from_validated(digest_date: &str, approval: &ValidatedApproval) -> Option<Self> {
        approval.deliverable_type.title()?;
        Some(Self {
            digest_date: digest_date.to_owned(),
            opp_id: approval.opp_id.clone(),
            deliverable_type: approval.deliverable_type,
            opportunity: approval.opportunity_data.clone(),
        })
    }

    pub fn context(&self) -> ContextKind {
        self.opp_id.category().into()
    }
}

/// A generated deliverable as persisted next to the digest mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverableRecord {
    pub timestamp: NaiveDateTime,
    pub digest_date: String,
    pub opportunity_id: OpportunityId,
    pub deliverable_type: DeliverableType,
    pub opportunity_data: Opportunity,
    pub deliverable_content: String,
    pub context_used: ContextUsed,
}

impl DeliverableRecord {
    pub fn new(request: DeliverableRequest, deliverable_content: impl Into<String>) -> Self {
        let context_used = ContextUsed { kind: request.context() };
        Self {
            timestamp: Local::now().naive_local(),
            digest_date: request.digest_date,
            opportunity_id: request.opp_id,
            deliverable_type: request.deliverable_type,
            opportunity_data: request.opportunity,
            deliverable_content: deliverable_content.into(),
            context_used,
        }
    }

    pub fn file_name(&self) -> String {
        deliverable_file_name(&self.digest_date, &self.opportunity_id, self.deliverable_type)
    }
}

pub fn deliverable_file_name(
    digest_date: &str,
    opp_id: &OpportunityId,
    deliverable_type: DeliverableType,
) -> String {
    format!("catalyst_{digest_date}_{opp_id}_{deliverable_type}.json")
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("deliverable generation failed for {opp_id}: {message}")]
    Failed { opp_id: OpportunityId, message: String },
    #[error("deliverable type `{0}` cannot be generated")]
    Unsupported(DeliverableType),
}

/// Produces the document body for an approved opportunity.
#[async_trait]
pub trait DeliverableGenerator: Send + Sync {
    async fn generate(&self, request: &DeliverableRequest) -> Result<String, GeneratorError>;
}

/// Emits a fixed section outline per deliverable type without calling out to a model.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDeliverableGenerator;

#[async_trait]
impl DeliverableGenerator for NoopDeliverableGenerator {
    async fn generate(&self, request: &DeliverableRequest) -> Result<String, GeneratorError> {
        let sections: &[&str] = match request.deliverable_type {
            DeliverableType::Plan => &[
                "Overview",
                "Implementation Approach",
                "Learning Path",
                "Integration Points",
                "Risks and Rollback",
                "Next Actions",
            ],
            DeliverableType::Brief => &[
                "Executive Summary",
                "Connection to Current Priorities",
                "Strategic Implications",
                "Implementation Considerations",
                "Recommended Approach",
                "Key Stakeholders",
            ],
            DeliverableType::Slide => {
                &["Slide Title", "Key Message", "Supporting Points", "So What?"]
            }
            DeliverableType::None => {
                return Err(GeneratorError::Unsupported(request.deliverable_type))
            }
        };

        let title = request.deliverable_type.title().unwrap_or_default();
        let mut lines = vec![format!("# {title}: {}", request.opportunity.title)];
        for section in sections {
            lines.push(String::new());
            lines.push(format!("## {section}"));
        }
        Ok(lines.join("\n"))
    }
}
