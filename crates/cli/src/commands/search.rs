use std::path::PathBuf;

use myclo_core::config::AppConfig;
use myclo_core::DigestImageUploader;
use serde_json::json;

use crate::closet_file;
use crate::commands::{current_thread_runtime, CommandResult};

const COMMAND: &str = "search";

#[derive(Clone, Debug)]
pub struct SearchArgs {
    pub closet: PathBuf,
    pub query: String,
}

pub fn run(config: &AppConfig, args: SearchArgs) -> CommandResult {
    let correlation_id = uuid::Uuid::new_v4().to_string();
    let runtime = match current_thread_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let uploader = DigestImageUploader::new(&config.upload.base_url, config.upload.max_bytes);
    let closet = match runtime.block_on(closet_file::load_closet(&args.closet, &uploader)) {
        Ok(closet) => closet,
        Err(error) => return CommandResult::closet_failure(COMMAND, &correlation_id, error),
    };

    let matches: Vec<_> = closet.search(&args.query).iter().collect();
    let message = if args.query.is_empty() {
        format!("{} items in closet", matches.len())
    } else {
        format!("{} of {} items match `{}`", matches.len(), closet.len(), args.query)
    };

    CommandResult::success_with_data(
        COMMAND,
        message,
        json!({
            "query": args.query,
            "items": matches,
        }),
    )
}
