//! Scan Command - Start a scan against a target URL

use anyhow::Result;
use clap::Args;

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::{OutputFormat, ProgressIndicator};
use crate::domain::scan::entities::TrackedScan;

use super::watch;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Target URL; https:// is assumed when no scheme is given
    pub target: String,

    /// Follow the scan live after starting it
    #[arg(long, short)]
    pub watch: bool,
}

/// Run the scan command
pub async fn run(ctx: &CliContext, cli: &Cli, args: &ScanArgs) -> Result<i32> {
    let Some(target) = normalize_target(&args.target) else {
        ctx.output.error("Please enter a target URL");
        return Ok(exit_codes::INPUT_ERROR);
    };

    let progress = if !cli.quiet && ctx.output.format() != OutputFormat::Json {
        Some(ProgressIndicator::spinner(&format!(
            "Starting scan of {target}..."
        )))
    } else {
        None
    };

    let response = match ctx.client.start_scan(&target).await {
        Ok(response) => response,
        Err(e) => {
            if let Some(p) = &progress {
                p.finish_and_clear();
            }
            ctx.output.error(&format!("Failed to start scan: {}", e));
            return Ok(super::backend_exit_code(&e));
        }
    };
    if let Some(p) = &progress {
        p.finish_and_clear();
    }

    // The scan runs regardless of whether we manage to record it
    let tracked = TrackedScan::new(response.scan_id.clone(), target.clone(), response.status);
    if let Err(e) = ctx.history.add(tracked).await {
        ctx.output
            .warn(&format!("Scan started but history was not updated: {}", e));
    }

    match ctx.output.format() {
        OutputFormat::Json => {
            if !args.watch {
                ctx.output.json(&response)?;
            }
        }
        _ => {
            ctx.output
                .success(&format!("Scan started: {}", response.scan_id));
            ctx.output.print(&format!("Target: {target}"));
            if !args.watch {
                ctx.output
                    .info(&format!("Follow it with: scanwatch watch {}", response.scan_id));
            }
        }
    }

    if args.watch {
        return watch::follow_scan(ctx, cli, &response.scan_id).await;
    }

    Ok(exit_codes::SUCCESS)
}

/// Normalize a user-supplied target: trim whitespace and default the
/// scheme to https. A blank target yields None.
fn normalize_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use clap::Parser;

    use crate::cli::output::OutputWriter;
    use crate::config::Config;
    use crate::domain::scan::entities::ScanStatus;
    use crate::infrastructure::api_clients::ScanApiClient;
    use crate::infrastructure::storage::InMemoryScanHistory;

    fn test_context(base_url: &str, history: InMemoryScanHistory) -> CliContext {
        CliContext {
            config: Arc::new(Config::default()),
            client: Arc::new(
                ScanApiClient::new(
                    base_url.to_string(),
                    "test-key".to_string(),
                    Duration::from_secs(5),
                )
                .expect("client builds"),
            ),
            history: Arc::new(history),
            output: OutputWriter::new(OutputFormat::Plain, true, false),
        }
    }

    #[test]
    fn blank_target_is_rejected() {
        assert_eq!(normalize_target(""), None);
        assert_eq!(normalize_target("   "), None);
    }

    #[test]
    fn scheme_defaults_to_https() {
        assert_eq!(
            normalize_target("example.com").as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn existing_scheme_is_preserved() {
        assert_eq!(
            normalize_target("http://example.com").as_deref(),
            Some("http://example.com")
        );
        assert_eq!(
            normalize_target("https://example.com").as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            normalize_target("  example.com  ").as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn started_scan_is_tracked_at_the_front() {
        let mut server = mockito::Server::new_async().await;
        let start_mock = server
            .mock("POST", "/scans")
            .match_header("x-api-key", "test-key")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({ "target": "https://example.com" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"scan_id": "abc123", "status": "started"}"#)
            .expect(1)
            .create_async()
            .await;

        let history = InMemoryScanHistory::with_scans(vec![TrackedScan::new(
            "older",
            "https://old.example.com",
            ScanStatus::Completed,
        )]);
        let ctx = test_context(&server.url(), history);
        let cli = Cli::try_parse_from(["scanwatch", "-q", "scan", "example.com"]).expect("parses");
        let args = ScanArgs {
            target: "example.com".to_string(),
            watch: false,
        };

        let code = run(&ctx, &cli, &args).await.expect("runs");
        assert_eq!(code, exit_codes::SUCCESS);

        let scans = ctx.history.list().await.expect("lists");
        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].id, "abc123");
        assert_eq!(scans[0].status, ScanStatus::Started);
        assert_eq!(scans[0].target, "https://example.com");
        assert_eq!(scans[1].id, "older");
        start_mock.assert_async().await;
    }

    #[tokio::test]
    async fn blank_target_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let start_mock = server.mock("POST", "/scans").expect(0).create_async().await;

        let ctx = test_context(&server.url(), InMemoryScanHistory::new());
        let cli = Cli::try_parse_from(["scanwatch", "-q", "scan", "   "]).expect("parses");
        let args = ScanArgs {
            target: "   ".to_string(),
            watch: false,
        };

        let code = run(&ctx, &cli, &args).await.expect("runs");
        assert_eq!(code, exit_codes::INPUT_ERROR);
        assert!(ctx.history.list().await.expect("lists").is_empty());
        start_mock.assert_async().await;
    }
}
