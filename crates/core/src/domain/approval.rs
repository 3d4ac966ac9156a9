use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::opportunity::{Category, Opportunity, OpportunityId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Approve,
    Dismiss,
}

impl Action {
    pub const KEYWORDS: [(&'static str, Action); 2] =
        [("approve", Action::Approve), ("dismiss", Action::Dismiss)];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Dismiss => "dismiss",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow-on document requested for an opportunity. `None` marks a dismissal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableType {
    Plan,
    Brief,
    Slide,
    None,
}

impl DeliverableType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Brief => "brief",
            Self::Slide => "slide",
            Self::None => "none",
        }
    }

    /// Human title of the generated document, absent for dismissals.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Self::Plan => Some("Technical Plan"),
            Self::Brief => Some("Leadership Brief"),
            Self::Slide => Some("Client Slide"),
            Self::None => None,
        }
    }

    /// Whether an `approve` of an opportunity in `category` may request this type.
    pub fn allowed_for(self, category: Category) -> bool {
        match category {
            Category::Homelab => self == Self::Plan,
            Category::Work => matches!(self, Self::Brief | Self::Slide),
        }
    }
}

impl fmt::Display for DeliverableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliverableType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plan" => Ok(Self::Plan),
            "brief" => Ok(Self::Brief),
            "slide" => Ok(Self::Slide),
            "none" => Ok(Self::None),
            other => Err(format!("unsupported deliverable type `{other}`")),
        }
    }
}

/// One requested action from a human reply, e.g. `W1 brief`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalItem {
    pub opp_id: OpportunityId,
    #[serde(rename = "type")]
    pub deliverable_type: DeliverableType,
    pub action: Action,
}

impl ApprovalItem {
    pub fn new(opp_id: OpportunityId, deliverable_type: DeliverableType, action: Action) -> Self {
        Self { opp_id, deliverable_type, action }
    }
}

/// An approval confirmed against a digest, carrying the opportunity payload
/// needed to generate the deliverable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedApproval {
    pub opp_id: OpportunityId,
    #[serde(rename = "type")]
    pub deliverable_type: DeliverableType,
    pub action: Action,
    pub opportunity_data: Opportunity,
}

#[cfg(test)]
mod tests {
    use super::{ApprovalItem, DeliverableType};
    use crate::domain::approval::Action;
    use crate::domain::opportunity::{Category, OpportunityId};

    #[test]
    fn homelab_accepts_only_plan_and_work_only_brief_or_slide() {
        assert!(DeliverableType::Plan.allowed_for(Category::Homelab));
        assert!(!DeliverableType::Brief.allowed_for(Category::Homelab));
        assert!(!DeliverableType::Slide.allowed_for(Category::Homelab));

        assert!(DeliverableType::Brief.allowed_for(Category::Work));
        assert!(DeliverableType::Slide.allowed_for(Category::Work));
        assert!(!DeliverableType::Plan.allowed_for(Category::Work));
        assert!(!DeliverableType::None.allowed_for(Category::Work));
    }

    #[test]
    fn approval_item_serializes_with_type_key() {
        let item = ApprovalItem::new(
            OpportunityId::new(Category::Work, 2),
            DeliverableType::Slide,
            Action::Approve,
        );
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["opp_id"], "W2");
        assert_eq!(json["type"], "slide");
        assert_eq!(json["action"], "approve");
    }

    #[test]
    fn deliverable_titles_match_generated_documents() {
        assert_eq!(DeliverableType::Plan.title(), Some("Technical Plan"));
        assert_eq!(DeliverableType::Brief.title(), Some("Leadership Brief"));
        assert_eq!(DeliverableType::Slide.title(), Some("Client Slide"));
        assert_eq!(DeliverableType::None.title(), None);
    }
}
