use crate::approvals::{CommandFailure, ValidationReport};
use crate::domain::approval::{ApprovalItem, ValidatedApproval};
use crate::domain::opportunity::OpportunityMap;

/// Checks each approval against the opportunities of the digest being
/// answered. Every approval is checked; a miss does not stop the rest.
pub fn validate_against_digest(
    approvals: &[ApprovalItem],
    opportunities: &OpportunityMap,
) -> ValidationReport {
    let mut report = ValidationReport {
        valid: true,
        validated_approvals: Vec::with_capacity(approvals.len()),
        errors: Vec::new(),
        failures: Vec::new(),
    };

    for approval in approvals {
        match opportunities.get(&approval.opp_id) {
            Some(opportunity) => report.validated_approvals.push(ValidatedApproval {
                opp_id: approval.opp_id.clone(),
                deliverable_type: approval.deliverable_type,
                action: approval.action,
                opportunity_data: opportunity.clone(),
            }),
            None => report.reject(CommandFailure::NotInDigest { opp_id: approval.opp_id.clone() }),
        }
    }

    report
}
