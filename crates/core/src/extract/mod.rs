//! Opportunity extraction from agent digest output.
//!
//! Agent output lists opportunities under headings of the form
//! `### Opportunity: <title>`. Everything before the first heading is
//! preamble. Each block after a heading becomes one [`Opportunity`], numbered
//! by position within the call: `H1, H2, ...` or `W1, W2, ...`.

pub mod subsection;

use crate::domain::opportunity::{Category, Opportunity, OpportunityId, OpportunityMap};

use self::subsection::{extract_subsection, NEXT_STEPS, RELEVANCE, SIGNAL};

const HEADING_MARK: &str = "###";
const HEADING_WORD: &str = "Opportunity:";

/// Splits `text` into opportunity blocks and assigns ids with the given
/// category prefix. Ids depend only on heading order, never on content.
pub fn extract(text: &str, category: Category) -> OpportunityMap {
    (1u32..)
        .zip(opportunity_blocks(text))
        .map(|(sequence, block)| (OpportunityId::new(category, sequence), parse_block(block)))
        .collect()
}

fn parse_block(block: &str) -> Opportunity {
    let full_text = block.trim();
    let title = full_text.lines().next().unwrap_or_default().trim();

    Opportunity {
        title: title.to_owned(),
        full_text: full_text.to_owned(),
        relevance: extract_subsection(block, RELEVANCE),
        signal: extract_subsection(block, SIGNAL),
        next_steps: extract_subsection(block, NEXT_STEPS),
    }
}

/// Raw text following each heading, up to the next heading or end of input.
fn opportunity_blocks(text: &str) -> Vec<&str> {
    let mut headings = Vec::new();
    let mut search_from = 0usize;

    while let Some(offset) = text[search_from..].find(HEADING_MARK) {
        let mark_start = search_from + offset;
        match heading_end(text, mark_start) {
            Some(end) => {
                headings.push((mark_start, end));
                search_from = end;
            }
            None => search_from = mark_start + HEADING_MARK.len(),
        }
    }

    headings
        .iter()
        .enumerate()
        .map(|(index, &(_, body_start))| {
            let body_end = headings.get(index + 1).map_or(text.len(), |&(next_start, _)| next_start);
            &text[body_start..body_end]
        })
        .collect()
}

/// If a heading starts at `mark_start`, returns the offset where its title
/// begins. The mark must open its line (indentation allowed); deeper marks
/// like `####` count too. It is followed by whitespace and `Opportunity:`.
fn heading_end(text: &str, mark_start: usize) -> Option<usize> {
    let line_prefix = text[..mark_start].rsplit('\n').next().unwrap_or_default();
    if !line_prefix.chars().all(char::is_whitespace) {
        return None;
    }

    let after_mark = mark_start + HEADING_MARK.len();
    let rest = text[after_mark..].trim_start_matches('#');
    let keyword = rest.trim_start();
    if keyword.len() == rest.len() || !keyword.starts_with(HEADING_WORD) {
        return None;
    }

    let after_keyword = &keyword[HEADING_WORD.len()..];
    let title = after_keyword.trim_start();
    Some(text.len() - title.len())
}
