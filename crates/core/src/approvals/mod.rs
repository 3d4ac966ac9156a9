//! Approval replies: `approve H1, W1 brief` / `dismiss W2`.
//!
//! Parsing runs in layers. [`command::parse_command`] checks the keyword, the
//! per-item grammar and the prefix/type rules; [`reference::validate_against_digest`]
//! then checks that each id exists in the digest being answered. Problems are
//! accumulated as [`CommandFailure`] values and never abort sibling items.

pub mod command;
pub mod help;
pub mod reference;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::approval::{Action, ApprovalItem, DeliverableType, ValidatedApproval};
use crate::domain::opportunity::OpportunityId;

pub use command::parse_command;
pub use help::help_message;
pub use reference::validate_against_digest;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Keyword, empty item list, or item grammar.
    Syntax,
    /// Well-formed item with a disallowed prefix/type combination.
    Semantic,
    /// Well-formed id that is not part of the digest.
    Reference,
}

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "failure", rename_all = "snake_case")]
pub enum CommandFailure {
    #[error("Message must start with 'approve' or 'dismiss'")]
    MissingKeyword,
    #[error("No opportunities specified")]
    NoOpportunities,
    #[error("Invalid format: '{item}' (expected: H1, W2 brief, etc.)")]
    InvalidItem { item: String },
    #[error("Homelab opportunities only support 'plan' (got: {requested})")]
    HomelabRequiresPlan { opp_id: OpportunityId, requested: DeliverableType },
    #[error(
        "Work opportunities require 'brief' or 'slide' (got: {})",
        .requested.map_or("none", DeliverableType::as_str)
    )]
    WorkRequiresBriefOrSlide { opp_id: OpportunityId, requested: Option<DeliverableType> },
    #[error("Opportunity {opp_id} not found in digest")]
    NotInDigest { opp_id: OpportunityId },
}

impl CommandFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingKeyword | Self::NoOpportunities | Self::InvalidItem { .. } => {
                FailureKind::Syntax
            }
            Self::HomelabRequiresPlan { .. } | Self::WorkRequiresBriefOrSlide { .. } => {
                FailureKind::Semantic
            }
            Self::NotInDigest { .. } => FailureKind::Reference,
        }
    }
}

/// Outcome of parsing one reply. `valid` holds only when at least one item
/// parsed and nothing failed; items that did parse are still listed when the
/// reply as a whole is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub valid: bool,
    pub action: Option<Action>,
    pub approvals: Vec<ApprovalItem>,
    pub errors: Vec<String>,
    pub failures: Vec<CommandFailure>,
}

impl ParseResult {
    fn reject(&mut self, failure: CommandFailure) {
        self.errors.push(failure.to_string());
        self.failures.push(failure);
    }
}

/// Outcome of checking parsed approvals against one digest snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub validated_approvals: Vec<ValidatedApproval>,
    pub errors: Vec<String>,
    pub failures: Vec<CommandFailure>,
}

impl ValidationReport {
    fn reject(&mut self, failure: CommandFailure) {
        self.valid = false;
        self.errors.push(failure.to_string());
        self.failures.push(failure);
    }
}
