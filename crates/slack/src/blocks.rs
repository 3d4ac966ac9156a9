use serde::Serialize;

use trendwatch_core::approvals::help_message;
use trendwatch_core::domain::approval::ValidatedApproval;
use trendwatch_core::domain::deliverable::DeliverableRecord;
use trendwatch_core::domain::digest::DigestSnapshot;
use trendwatch_core::domain::opportunity::Category;
use trendwatch_core::render::{approval_syntax_footer, format_opportunity};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    #[serde(rename = "plain_text")]
    Plain { text: String },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Plain { text } | Self::Mrkdwn { text } => text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { block_id: String, text: TextObject },
    Section { block_id: String, text: TextObject },
    Divider { block_id: String },
    Context { block_id: String, elements: Vec<TextObject> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageTemplate {
    pub fallback_text: String,
    pub blocks: Vec<Block>,
}

impl MessageTemplate {
    /// Readable rendering for terminals and logs; dividers become blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Header { text, .. } | Block::Section { text, .. } => text.text().to_owned(),
                Block::Divider { .. } => String::new(),
                Block::Context { elements, .. } => {
                    elements.iter().map(TextObject::text).collect::<Vec<_>>().join(" ")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct MessageBuilder {
    fallback_text: String,
    blocks: Vec<Block>,
}

impl MessageBuilder {
    pub fn new(fallback_text: impl Into<String>) -> Self {
        Self { fallback_text: fallback_text.into(), blocks: Vec::new() }
    }

    pub fn header(mut self, block_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Header { block_id: block_id.into(), text: TextObject::plain(text) });
        self
    }

    pub fn section<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut SectionBuilder),
    {
        let mut builder = SectionBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Section { block_id: block_id.into(), text: builder.build() });
        self
    }

    pub fn divider(mut self, block_id: impl Into<String>) -> Self {
        self.blocks.push(Block::Divider { block_id: block_id.into() });
        self
    }

    pub fn context<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut ContextBuilder),
    {
        let mut builder = ContextBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Context { block_id: block_id.into(), elements: builder.build() });
        self
    }

    pub fn build(self) -> MessageTemplate {
        MessageTemplate { fallback_text: self.fallback_text, blocks: self.blocks }
    }
}

#[derive(Default)]
pub struct SectionBuilder {
    text: Option<TextObject>,
}

impl SectionBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> TextObject {
        self.text.unwrap_or_else(|| TextObject::plain(""))
    }
}

#[derive(Default)]
pub struct ContextBuilder {
    elements: Vec<TextObject>,
}

impl ContextBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> Vec<TextObject> {
        self.elements
    }
}

/// The daily digest post: homelab opportunities, then work opportunities,
/// then the reply syntax.
pub fn digest_message(snapshot: &DigestSnapshot) -> MessageTemplate {
    let homelab = snapshot.count_for(Category::Homelab);
    let work = snapshot.count_for(Category::Work);

    let mut builder = MessageBuilder::new(format!(
        "Digest for {}: {homelab} homelab and {work} work opportunities",
        snapshot.digest_date
    ))
    .header("digest.header.v1", format!("Daily Catalyst Digest: {}", snapshot.digest_date));

    for (category, heading, count) in [
        (Category::Homelab, "*🏠 Homelab opportunities*", homelab),
        (Category::Work, "*💼 Work opportunities*", work),
    ] {
        builder = builder
            .divider(format!("digest.{}.divider.v1", category.as_str()))
            .section(format!("digest.{}.heading.v1", category.as_str()), |section| {
                section.mrkdwn(heading);
            });

        if count == 0 {
            builder = builder
                .section(format!("digest.{}.empty.v1", category.as_str()), |section| {
                    section.plain(format!("No {} opportunities today.", category.as_str()));
                });
            continue;
        }

        for (id, opportunity) in
            snapshot.opportunities.iter().filter(|(id, _)| id.category() == category)
        {
            builder = builder.section(format!("digest.opportunity.{id}.v1"), |section| {
                section.mrkdwn(format_opportunity(id, opportunity));
            });
        }
    }

    builder
        .divider("digest.footer.divider.v1")
        .context("digest.footer.v1", |context| {
            context.mrkdwn(approval_syntax_footer());
        })
        .build()
}

pub fn help_reply<S: AsRef<str>>(errors: &[S]) -> MessageTemplate {
    let text = help_message(errors);
    MessageBuilder::new(text.clone())
        .section("approval.help.v1", |section| {
            section.mrkdwn(text);
        })
        .build()
}

/// Lists each generated deliverable as `[ID] title → Deliverable Title`.
pub fn confirmation_message(digest_date: &str, records: &[DeliverableRecord]) -> MessageTemplate {
    let lines = records
        .iter()
        .map(|record| {
            let title = record
                .deliverable_type
                .title()
                .unwrap_or_else(|| record.deliverable_type.as_str());
            format!(
                "• [{}] {} → {title}",
                record.opportunity_id, record.opportunity_data.title
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    MessageBuilder::new(format!(
        "Generated {} deliverable(s) for the {digest_date} digest",
        records.len()
    ))
    .section("approval.confirmation.summary.v1", |section| {
        section.mrkdwn(format!("✅ *Approved and generated:*\n{lines}"));
    })
    .context("approval.confirmation.context.v1", |context| {
        context.plain(format!("Digest {digest_date}"));
    })
    .build()
}

pub fn dismissal_message(digest_date: &str, dismissed: &[ValidatedApproval]) -> MessageTemplate {
    let ids =
        dismissed.iter().map(|approval| approval.opp_id.to_string()).collect::<Vec<_>>().join(", ");

    MessageBuilder::new(format!("Dismissed {ids}"))
        .section("approval.dismissal.summary.v1", |section| {
            section.mrkdwn(format!("👋 Dismissed: {ids}"));
        })
        .context("approval.dismissal.context.v1", |context| {
            context.plain(format!("Digest {digest_date}"));
        })
        .build()
}

pub fn error_message(summary: &str, correlation_id: &str) -> MessageTemplate {
    MessageBuilder::new(summary.to_owned())
        .section("approval.error.summary.v1", |section| {
            section.mrkdwn(format!(":warning: {summary}"));
        })
        .context("approval.error.context.v1", |context| {
            context.plain(format!("Correlation ID: {correlation_id}"));
        })
        .build()
}

#[cfg(test)]
mod tests {
    use trendwatch_core::domain::approval::{Action, DeliverableType, ValidatedApproval};
    use trendwatch_core::domain::deliverable::{DeliverableRecord, DeliverableRequest};
    use trendwatch_core::domain::digest::DigestSnapshot;
    use trendwatch_core::domain::opportunity::{
        Category, Opportunity, OpportunityId, OpportunityMap,
    };

    use super::{
        confirmation_message, digest_message, dismissal_message, error_message, help_reply,
        Block, MessageBuilder, TextObject,
    };

    fn opportunity(title: &str) -> Opportunity {
        Opportunity {
            title: title.to_owned(),
            relevance: "Relevant".to_owned(),
            signal: "Signal".to_owned(),
            next_steps: "Steps".to_owned(),
            ..Opportunity::default()
        }
    }

    fn section_texts(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|block| match block {
                Block::Section { text, .. } => Some(text.text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn message_builder_creates_typed_block_structure() {
        let message = MessageBuilder::new("fallback")
            .header("digest.header.v1", "Digest")
            .section("digest.summary.v1", |section| {
                section.mrkdwn("*Summary*");
            })
            .divider("digest.divider.v1")
            .build();

        assert_eq!(message.blocks.len(), 3);
        assert!(matches!(
            &message.blocks[1],
            Block::Section {
                block_id,
                text: TextObject::Mrkdwn { .. }
            } if block_id == "digest.summary.v1"
        ));
        assert_eq!(message.plain_text(), "Digest\n*Summary*\n");
    }

    #[test]
    fn header_serializes_as_plain_text_object() {
        let message = MessageBuilder::new("fallback").header("h.v1", "Title").build();
        let json = serde_json::to_value(&message.blocks[0]).expect("serialize block");

        assert_eq!(json["type"], "header");
        assert_eq!(json["text"]["type"], "plain_text");
        assert_eq!(json["text"]["text"], "Title");
    }

    #[test]
    fn digest_lists_homelab_before_work_in_id_order() {
        let mut opportunities = OpportunityMap::new();
        opportunities.insert(OpportunityId::new(Category::Work, 1), opportunity("Review Bots"));
        opportunities.insert(OpportunityId::new(Category::Homelab, 10), opportunity("Tenth"));
        opportunities.insert(OpportunityId::new(Category::Homelab, 2), opportunity("Second"));
        let message = digest_message(&DigestSnapshot::new("2026-02-02", opportunities));

        let texts = section_texts(&message.blocks);
        let position = |needle: &str| {
            texts.iter().position(|text| text.starts_with(needle)).expect("section present")
        };
        assert!(position("*[H2] Second*") < position("*[H10] Tenth*"));
        assert!(position("*[H10] Tenth*") < position("*[W1] Review Bots*"));
        assert!(message.fallback_text.contains("2 homelab and 1 work"));
        assert!(matches!(message.blocks.last(), Some(Block::Context { .. })));
    }

    #[test]
    fn digest_marks_empty_category() {
        let mut opportunities = OpportunityMap::new();
        opportunities.insert(OpportunityId::new(Category::Homelab, 1), opportunity("Only"));
        let message = digest_message(&DigestSnapshot::new("2026-02-02", opportunities));

        assert!(section_texts(&message.blocks).contains(&"No work opportunities today."));
    }

    #[test]
    fn help_reply_carries_errors() {
        let message = help_reply(&["Opportunity H9 not found in digest"]);

        assert!(message.fallback_text.ends_with("  • Opportunity H9 not found in digest"));
        assert_eq!(section_texts(&message.blocks), vec![message.fallback_text.as_str()]);
    }

    #[test]
    fn confirmation_names_deliverable_titles() {
        let records = [
            (Category::Homelab, 1, DeliverableType::Plan, "Local LLM Fine-tuning"),
            (Category::Work, 2, DeliverableType::Slide, "Edge Caching"),
        ]
        .into_iter()
        .map(|(category, sequence, deliverable_type, title)| {
            DeliverableRecord::new(
                DeliverableRequest {
                    digest_date: "2026-02-02".to_owned(),
                    opp_id: OpportunityId::new(category, sequence),
                    deliverable_type,
                    opportunity: opportunity(title),
                },
                "body",
            )
        })
        .collect::<Vec<_>>();

        let message = confirmation_message("2026-02-02", &records);
        let summary = section_texts(&message.blocks)[0];
        assert!(summary.contains("[H1] Local LLM Fine-tuning → Technical Plan"));
        assert!(summary.contains("[W2] Edge Caching → Client Slide"));
    }

    #[test]
    fn dismissal_lists_ids() {
        let dismissed = [1, 3]
            .into_iter()
            .map(|sequence| ValidatedApproval {
                opp_id: OpportunityId::new(Category::Homelab, sequence),
                deliverable_type: DeliverableType::None,
                action: Action::Dismiss,
                opportunity_data: opportunity("x"),
            })
            .collect::<Vec<_>>();

        let message = dismissal_message("2026-02-02", &dismissed);
        assert_eq!(message.fallback_text, "Dismissed H1, H3");
    }

    #[test]
    fn error_template_contains_correlation_id() {
        let message = error_message("Cannot process request", "req-123");
        let elements = if let Block::Context { elements, .. } = &message.blocks[1] {
            Some(elements)
        } else {
            None
        };
        assert!(elements.is_some(), "expected context block");
        let elements = elements.expect("context block asserted above");
        assert!(matches!(
            elements.first(),
            Some(TextObject::Plain { text }) if text.contains("req-123")
        ));
    }
}
