use crate::approvals::{CommandFailure, ParseResult};
use crate::domain::approval::{Action, ApprovalItem, DeliverableType};
use crate::domain::opportunity::{Category, OpportunityId};

/// Parses a human reply such as `approve H1, W1 brief, W2 slide`.
///
/// Never fails: every problem is recorded on the returned [`ParseResult`].
pub fn parse_command(raw: &str) -> ParseResult {
    let text = raw.trim().to_lowercase();
    let mut result = ParseResult::default();

    let Some((action, remainder)) = split_keyword(&text) else {
        result.reject(CommandFailure::MissingKeyword);
        return result;
    };
    result.action = Some(action);

    let items = remainder.trim();
    if items.is_empty() {
        result.reject(CommandFailure::NoOpportunities);
        return result;
    }

    for item in items.split(',').map(str::trim) {
        match parse_item(item, action) {
            Ok(approval) => result.approvals.push(approval),
            Err(failure) => result.reject(failure),
        }
    }

    result.valid = !result.approvals.is_empty() && result.failures.is_empty();
    result
}

fn split_keyword(text: &str) -> Option<(Action, &str)> {
    Action::KEYWORDS
        .iter()
        .find_map(|(keyword, action)| text.strip_prefix(*keyword).map(|rest| (*action, rest)))
}

/// One comma-separated item: `h` or `w`, digits, then optionally whitespace
/// and one of `plan`, `brief`, `slide`.
fn parse_item(item: &str, action: Action) -> Result<ApprovalItem, CommandFailure> {
    let invalid = || CommandFailure::InvalidItem { item: item.to_owned() };

    let prefix = item.chars().next().ok_or_else(invalid)?;
    let category = Category::from_prefix(prefix).ok_or_else(invalid)?;

    let rest = &item[prefix.len_utf8()..];
    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return Err(invalid());
    }
    let (digits, tail) = rest.split_at(digit_count);
    let requested = parse_requested_type(tail).ok_or_else(invalid)?;

    let opp_id = OpportunityId::from_digits(category, digits).ok_or_else(invalid)?;
    let deliverable_type = match action {
        Action::Dismiss => DeliverableType::None,
        Action::Approve => approved_type(&opp_id, requested)?,
    };

    Ok(ApprovalItem::new(opp_id, deliverable_type, action))
}

/// `Some(None)` for an empty tail, `Some(Some(type))` for whitespace followed
/// by a known word, `None` for anything else.
fn parse_requested_type(tail: &str) -> Option<Option<DeliverableType>> {
    if tail.is_empty() {
        return Some(None);
    }

    let word = tail.trim_start();
    if word.len() == tail.len() {
        return None;
    }

    match word.to_ascii_lowercase().as_str() {
        "plan" => Some(Some(DeliverableType::Plan)),
        "brief" => Some(Some(DeliverableType::Brief)),
        "slide" => Some(Some(DeliverableType::Slide)),
        _ => None,
    }
}

fn approved_type(
    opp_id: &OpportunityId,
    requested: Option<DeliverableType>,
) -> Result<DeliverableType, CommandFailure> {
    match (opp_id.category(), requested) {
        (Category::Homelab, None) => Ok(DeliverableType::Plan),
        (Category::Homelab, Some(requested)) => {
            if requested.allowed_for(Category::Homelab) {
                Ok(requested)
            } else {
                Err(CommandFailure::HomelabRequiresPlan { opp_id: opp_id.clone(), requested })
            }
        }
        (Category::Work, Some(requested)) if requested.allowed_for(Category::Work) => {
            Ok(requested)
        }
        (Category::Work, requested) => {
            Err(CommandFailure::WorkRequiresBriefOrSlide { opp_id: opp_id.clone(), requested })
        }
    }
}
