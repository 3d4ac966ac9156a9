use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use trendwatch_core::approvals::{parse_command, validate_against_digest};
use trendwatch_core::domain::approval::{Action, ValidatedApproval};
use trendwatch_core::domain::deliverable::{
    DeliverableGenerator, DeliverableRecord, DeliverableRequest, GeneratorError,
};
use trendwatch_core::errors::{ApplicationError, InterfaceError};
use trendwatch_store::{DigestStore, StoreError};

use crate::blocks::{self, MessageTemplate};

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Generation(#[from] GeneratorError),
}

impl ReplyError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        ApplicationError::from(self).into_interface(correlation_id)
    }
}

impl From<ReplyError> for ApplicationError {
    fn from(value: ReplyError) -> Self {
        match value {
            ReplyError::Store(error) if error.is_not_found() => {
                ApplicationError::NotFound(error.to_string())
            }
            ReplyError::Store(error) => ApplicationError::Persistence(error.to_string()),
            ReplyError::Generation(error) => ApplicationError::Generation(error),
        }
    }
}

/// What a reply to a digest resolved to, with the message to post back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Parsing or cross-validation failed; nothing was generated.
    Rejected { errors: Vec<String>, message: MessageTemplate },
    Dismissed { dismissed: Vec<ValidatedApproval>, message: MessageTemplate },
    Generated { records: Vec<DeliverableRecord>, paths: Vec<PathBuf>, message: MessageTemplate },
}

impl ReplyOutcome {
    pub fn message(&self) -> &MessageTemplate {
        match self {
            Self::Rejected { message, .. }
            | Self::Dismissed { message, .. }
            | Self::Generated { message, .. } => message,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Answers a thread reply to a digest: parse, check against the saved
/// snapshot, then dismiss or generate deliverables in reply order.
pub struct ApprovalReplyHandler<S, G> {
    store: S,
    generator: G,
}

impl<S, G> ApprovalReplyHandler<S, G>
where
    S: DigestStore,
    G: DeliverableGenerator,
{
    pub fn new(store: S, generator: G) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn handle(
        &self,
        digest_date: &str,
        text: &str,
        request_id: &str,
    ) -> Result<ReplyOutcome, ReplyError> {
        let parsed = parse_command(text);
        if !parsed.valid {
            return Ok(self.reject(digest_date, request_id, "syntax", parsed.errors));
        }

        let snapshot = self.store.load_snapshot(digest_date).await?;
        let report = validate_against_digest(&parsed.approvals, &snapshot.opportunities);
        if !report.valid {
            return Ok(self.reject(digest_date, request_id, "reference", report.errors));
        }

        if parsed.action == Some(Action::Dismiss) {
            info!(
                event_name = "approval.reply.dismissed",
                digest_date = %digest_date,
                request_id = %request_id,
                dismissed_count = report.validated_approvals.len(),
                "opportunities dismissed"
            );
            let message = blocks::dismissal_message(digest_date, &report.validated_approvals);
            return Ok(ReplyOutcome::Dismissed { dismissed: report.validated_approvals, message });
        }

        let mut records = Vec::with_capacity(report.validated_approvals.len());
        let mut paths = Vec::with_capacity(report.validated_approvals.len());
        for approval in &report.validated_approvals {
            let Some(request) = DeliverableRequest::from_validated(digest_date, approval) else {
                continue;
            };

            let content = self.generator.generate(&request).await?;
            let record = DeliverableRecord::new(request, content);
            paths.push(self.store.save_deliverable(&record).await?);
            records.push(record);
        }

        info!(
            event_name = "approval.reply.generated",
            digest_date = %digest_date,
            request_id = %request_id,
            deliverable_count = records.len(),
            "deliverables generated"
        );
        let message = blocks::confirmation_message(digest_date, &records);
        Ok(ReplyOutcome::Generated { records, paths, message })
    }

    fn reject(
        &self,
        digest_date: &str,
        request_id: &str,
        stage: &'static str,
        errors: Vec<String>,
    ) -> ReplyOutcome {
        warn!(
            event_name = "approval.reply.rejected",
            digest_date = %digest_date,
            request_id = %request_id,
            stage,
            error_count = errors.len(),
            "approval reply rejected"
        );
        let message = blocks::help_reply(&errors);
        ReplyOutcome::Rejected { errors, message }
    }
}
