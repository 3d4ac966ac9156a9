use trendwatch_core::config::ConfigOverrides;
use trendwatch_store::{DigestStore, FileDigestStore};

use crate::commands::{build_runtime, load_config, CommandResult};

pub fn run(digest_date: &str, message_ts: &str, overrides: ConfigOverrides) -> CommandResult {
    let config = match load_config("record-ts", overrides) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("record-ts") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let store = FileDigestStore::new(config.storage.output_dir);
    match runtime.block_on(store.record_message_ts(digest_date, message_ts)) {
        Ok(snapshot) => CommandResult::success(
            "record-ts",
            format!(
                "digest {} now references message {}",
                snapshot.digest_date, snapshot.digest_message_ts
            ),
        ),
        Err(error) => CommandResult::failure("record-ts", "store", error.to_string(), 5),
    }
}
