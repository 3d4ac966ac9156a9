//! Slack surface for the daily catalyst digest
//!
//! - **Block Kit** (`blocks`) - digest post, help reply, confirmations
//! - **Approvals** (`approvals`) - thread reply handling: parse, check against
//!   the saved digest, then dismiss or generate deliverables
//!
//! # Flow
//!
//! ```text
//! thread reply → ApprovalReplyHandler → parse_command → validate_against_digest
//!                     ↓                                        ↓
//!              help_reply (rejected)              DeliverableGenerator → DigestStore
//! ```

pub mod approvals;
pub mod blocks;

pub use approvals::{ApprovalReplyHandler, ReplyError, ReplyOutcome};
pub use blocks::{digest_message, help_reply, MessageBuilder, MessageTemplate};
