use crate::domain::opportunity::{Opportunity, OpportunityId};

/// Slack mrkdwn for one opportunity: bold id and title, italic relevance,
/// then signal and next steps, followed by a blank line.
pub fn format_opportunity(id: &OpportunityId, opportunity: &Opportunity) -> String {
    [
        format!("*[{id}] {}*", opportunity.title),
        format!("_{}_", opportunity.relevance),
        format!("Signal: {}", opportunity.signal),
        format!("Next Steps: {}", opportunity.next_steps),
        String::new(),
    ]
    .join("\n")
}

/// Reply syntax reminder shown under a digest.
pub fn approval_syntax_footer() -> &'static str {
    "Reply with `approve H1`, `approve W1 brief`, `approve W2 slide`, or `dismiss H1`. \
     Combine several with commas: `approve H1, W1 brief`."
}
