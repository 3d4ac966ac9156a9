use trendwatch_core::config::ConfigOverrides;
use trendwatch_core::render::format_opportunity;
use trendwatch_slack::digest_message;
use trendwatch_store::{DigestStore, FileDigestStore};

use crate::commands::{build_runtime, load_config, CommandResult};

/// Prints the saved digest, either as formatted text or as the Block Kit
/// payload that would be posted.
pub fn run(digest_date: &str, blocks: bool, overrides: ConfigOverrides) -> CommandResult {
    let config = match load_config("show", overrides) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("show") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let store = FileDigestStore::new(config.storage.output_dir);
    let snapshot = match runtime.block_on(store.load_snapshot(digest_date)) {
        Ok(snapshot) => snapshot,
        Err(error) => return CommandResult::failure("show", "store", error.to_string(), 5),
    };

    if blocks {
        return match serde_json::to_string_pretty(&digest_message(&snapshot)) {
            Ok(payload) => CommandResult::success("show", payload),
            Err(error) => CommandResult::failure("show", "serialization", error.to_string(), 5),
        };
    }

    let text = snapshot
        .opportunities
        .iter()
        .map(|(id, opportunity)| format_opportunity(id, opportunity))
        .collect::<Vec<_>>()
        .join("\n");
    CommandResult::success("show", text)
}
