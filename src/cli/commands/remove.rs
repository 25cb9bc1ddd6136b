//! Remove Command - Drop a scan from the local history

use anyhow::Result;
use clap::Args;

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;

/// Arguments for the remove command
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Scan id to remove from the history
    pub scan_id: String,
}

/// Run the remove command
///
/// Only the local record is dropped; a scan still running on the backend
/// is not affected.
pub async fn run(ctx: &CliContext, _cli: &Cli, args: &RemoveArgs) -> Result<i32> {
    ctx.history.remove(&args.scan_id).await?;
    ctx.output
        .success(&format!("Removed scan {} from history", args.scan_id));
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use clap::Parser;

    use crate::cli::output::{OutputFormat, OutputWriter};
    use crate::config::Config;
    use crate::domain::scan::entities::{ScanStatus, TrackedScan};
    use crate::infrastructure::api_clients::ScanApiClient;
    use crate::infrastructure::storage::InMemoryScanHistory;

    fn test_context(history: InMemoryScanHistory) -> CliContext {
        CliContext {
            config: Arc::new(Config::default()),
            // Nothing listens here; removal must never touch the backend
            client: Arc::new(
                ScanApiClient::new(
                    "http://127.0.0.1:1".to_string(),
                    "test-key".to_string(),
                    Duration::from_secs(1),
                )
                .expect("client builds"),
            ),
            history: Arc::new(history),
            output: OutputWriter::new(OutputFormat::Plain, true, false),
        }
    }

    #[tokio::test]
    async fn test_remove_drops_the_local_record() {
        let history = InMemoryScanHistory::with_scans(vec![TrackedScan::new(
            "abc123",
            "https://example.com",
            ScanStatus::Running,
        )]);
        let ctx = test_context(history);
        let cli = Cli::try_parse_from(["scanwatch", "-q", "remove", "abc123"]).expect("parses");
        let args = RemoveArgs {
            scan_id: "abc123".to_string(),
        };

        let code = run(&ctx, &cli, &args).await.expect("runs");
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(ctx.history.list().await.expect("lists").is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_scan_still_succeeds() {
        let ctx = test_context(InMemoryScanHistory::new());
        let cli = Cli::try_parse_from(["scanwatch", "-q", "remove", "nope"]).expect("parses");
        let args = RemoveArgs {
            scan_id: "nope".to_string(),
        };

        let code = run(&ctx, &cli, &args).await.expect("runs");
        assert_eq!(code, exit_codes::SUCCESS);
    }
}
