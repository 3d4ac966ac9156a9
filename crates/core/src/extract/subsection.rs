//! Labeled-subsection scanner for opportunity blocks.
//!
//! A subsection is introduced by a bold label such as `**Relevance:**` or
//! `**Relevance to Homelab:**`. Its body runs from the end of the label to the
//! nearest boundary:
//!
//! 1. a newline followed (after optional whitespace) by `**` and an ASCII
//!    uppercase letter, i.e. the next label;
//! 2. a newline followed (after optional whitespace) by `---`;
//! 3. the end of the block.
//!
//! Whichever comes first wins. Only the first label matching a name is used.

pub const RELEVANCE: &str = "Relevance";
pub const SIGNAL: &str = "Signal";
pub const NEXT_STEPS: &str = "Next Steps";

const LABEL_OPEN: &str = "**";
const LABEL_CLOSE: &str = ":**";
const SEPARATOR: &str = "---";

/// Returns the trimmed body of the first subsection whose label starts with
/// `name`, or an empty string when no such label exists.
pub fn extract_subsection(block: &str, name: &str) -> String {
    let Some(body_start) = find_label_end(block, name) else {
        return String::new();
    };

    let body = &block[body_start..];
    let body_end = find_boundary(body).unwrap_or(body.len());
    body[..body_end].trim().to_owned()
}

/// Byte offset just past the closing `:**` of the first label for `name`.
/// Extra words between the name and the colon are allowed; a newline is not.
fn find_label_end(block: &str, name: &str) -> Option<usize> {
    let needle = format!("{LABEL_OPEN}{name}");
    let mut search_from = 0usize;

    while let Some(offset) = block[search_from..].find(&needle) {
        let label_start = search_from + offset;
        let qualifier_start = label_start + needle.len();
        let qualifier = &block[qualifier_start..];

        if let Some(stop) = qualifier.find(|ch: char| ch == ':' || ch == '\n') {
            if qualifier[stop..].starts_with(LABEL_CLOSE) {
                return Some(qualifier_start + stop + LABEL_CLOSE.len());
            }
        }

        search_from = label_start + 1;
    }

    None
}

fn find_boundary(body: &str) -> Option<usize> {
    body.match_indices('\n').map(|(index, _)| index).find(|&index| {
        let next = body[index + 1..].trim_start();
        next.starts_with(SEPARATOR) || starts_label(next)
    })
}

fn starts_label(text: &str) -> bool {
    text.strip_prefix(LABEL_OPEN)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|ch| ch.is_ascii_uppercase())
}
