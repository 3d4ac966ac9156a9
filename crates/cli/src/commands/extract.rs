use std::fs;
use std::path::Path;

use anyhow::Context;
use trendwatch_core::config::ConfigOverrides;
use trendwatch_core::domain::digest::DigestSnapshot;
use trendwatch_core::domain::opportunity::Category;
use trendwatch_core::extract::extract;
use trendwatch_store::{DigestStore, FileDigestStore};

use crate::commands::{build_runtime, load_config, CommandResult};

pub struct ExtractArgs<'a> {
    pub digest_date: &'a str,
    pub homelab: &'a Path,
    pub work: &'a Path,
    pub message_ts: Option<&'a str>,
}

pub fn run(args: ExtractArgs<'_>, overrides: ConfigOverrides) -> CommandResult {
    let config = match load_config("extract", overrides) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let (homelab_text, work_text) = match read_inputs(args.homelab, args.work) {
        Ok(inputs) => inputs,
        Err(error) => {
            return CommandResult::failure("extract", "input_read", format!("{error:#}"), 4);
        }
    };

    let mut snapshot = DigestSnapshot::combine(
        args.digest_date,
        extract(&homelab_text, Category::Homelab),
        extract(&work_text, Category::Work),
    );
    if let Some(message_ts) = args.message_ts {
        snapshot = snapshot.with_message_ts(message_ts);
    }

    let runtime = match build_runtime("extract") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let store = FileDigestStore::new(config.storage.output_dir);
    let path = store.snapshot_path(args.digest_date);
    match runtime.block_on(store.save_snapshot(&snapshot)) {
        Ok(()) => CommandResult::success(
            "extract",
            format!(
                "saved {} opportunities ({} homelab, {} work) to {}",
                snapshot.opportunities.len(),
                snapshot.count_for(Category::Homelab),
                snapshot.count_for(Category::Work),
                path.display()
            ),
        ),
        Err(error) => CommandResult::failure("extract", "store", error.to_string(), 5),
    }
}

fn read_inputs(homelab: &Path, work: &Path) -> anyhow::Result<(String, String)> {
    let homelab_text = fs::read_to_string(homelab)
        .with_context(|| format!("failed to read homelab output `{}`", homelab.display()))?;
    let work_text = fs::read_to_string(work)
        .with_context(|| format!("failed to read work output `{}`", work.display()))?;
    Ok((homelab_text, work_text))
}
