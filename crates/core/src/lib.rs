pub mod approvals;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod render;

pub use approvals::{
    help_message, parse_command, validate_against_digest, CommandFailure, FailureKind,
    ParseResult, ValidationReport,
};
pub use domain::approval::{Action, ApprovalItem, DeliverableType, ValidatedApproval};
pub use domain::deliverable::{
    DeliverableGenerator, DeliverableRecord, DeliverableRequest, GeneratorError,
    NoopDeliverableGenerator,
};
pub use domain::digest::DigestSnapshot;
pub use domain::opportunity::{Category, Opportunity, OpportunityId, OpportunityMap};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use extract::extract;
pub use render::format_opportunity;
