use chrono::Utc;
use trendwatch_core::config::ConfigOverrides;
use trendwatch_core::domain::deliverable::NoopDeliverableGenerator;
use trendwatch_slack::blocks::error_message;
use trendwatch_slack::{ApprovalReplyHandler, ReplyError, ReplyOutcome};
use trendwatch_store::FileDigestStore;

use crate::commands::{build_runtime, load_config, CommandResult};

pub fn run(digest_date: &str, text: &str, overrides: ConfigOverrides) -> CommandResult {
    let config = match load_config("reply", overrides) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("reply") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let request_id = format!("cli-{}", Utc::now().timestamp_millis());
    let handler = ApprovalReplyHandler::new(
        FileDigestStore::new(config.storage.output_dir),
        NoopDeliverableGenerator,
    );

    match runtime.block_on(handler.handle(digest_date, text, &request_id)) {
        Ok(outcome @ ReplyOutcome::Rejected { .. }) => {
            CommandResult::failure("reply", "rejected_reply", outcome.message().plain_text(), 6)
        }
        Ok(outcome) => CommandResult::success("reply", outcome.message().plain_text()),
        Err(error) => {
            let error_class = match &error {
                ReplyError::Store(_) => "store",
                ReplyError::Generation(_) => "generation",
            };
            let detail = error.to_string();
            let interface = error.into_interface(request_id);
            let message = error_message(
                &format!("{} {detail}", interface.user_message()),
                interface.correlation_id(),
            );
            CommandResult::failure("reply", error_class, message.plain_text(), 5)
        }
    }
}
