//! Output formatting for CLI commands
//!
//! All user-facing output goes through [`OutputWriter`] so the `--format`,
//! `--quiet`, and `--verbose` flags behave the same across commands. Status
//! messages go to stderr, payload output (tables, JSON) to stdout, so JSON
//! stays pipeable.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

use crate::domain::scan::entities::{Finding, TrackedScan};

/// Output format for CLI results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table format (default)
    #[default]
    Table,
    /// JSON output for machine processing
    Json,
    /// Plain text output
    Plain,
}

/// Writer for all command output, honoring the global CLI flags
#[derive(Debug, Clone)]
pub struct OutputWriter {
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print a line of payload output to stdout
    pub fn print(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
            println!("{}", "-".repeat(title.len()));
        }
    }

    /// Informational status message on stderr
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Warning on stderr; suppressed by --quiet
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("warning: {message}");
        }
    }

    /// Error on stderr; never suppressed. Printed verbatim since several
    /// error strings are fixed wording callers rely on.
    pub fn error(&self, message: &str) {
        eprintln!("{message}");
    }

    /// Success confirmation on stdout
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {message}");
        }
    }

    /// Debug detail shown only with --verbose
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Serialize a value as pretty JSON to stdout
    ///
    /// JSON is payload, not chatter: it prints even under --quiet so the
    /// command stays usable in pipelines.
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Render findings as a table, most severe first
    pub fn print_findings_table(&self, findings: &[Finding]) {
        if self.quiet {
            return;
        }

        let mut sorted: Vec<&Finding> = findings.iter().collect();
        sorted.sort_by_key(|f| f.severity);

        println!(
            "{:<10} {:<42} {:<34} {:<10} {}",
            "SEVERITY", "NAME", "URL", "SCANNER", "CWE"
        );
        for finding in sorted {
            println!(
                "{:<10} {:<42} {:<34} {:<10} {}",
                finding.severity,
                truncate(&finding.name, 40),
                truncate(&finding.url, 32),
                finding.scanner,
                finding.cwe.as_deref().unwrap_or("-"),
            );
        }
    }

    /// Render the tracked scan list as a table, most recent first
    pub fn print_scans_table(&self, scans: &[TrackedScan]) {
        if self.quiet {
            return;
        }

        println!(
            "{:<14} {:<10} {:<42} {}",
            "ID", "STATUS", "TARGET", "STARTED"
        );
        for scan in scans {
            println!(
                "{:<14} {:<10} {:<42} {}",
                truncate(&scan.id, 12),
                scan.status,
                truncate(&scan.target, 40),
                scan.started_at.format("%Y-%m-%d %H:%M:%S"),
            );
        }
    }
}

/// Spinner shown while a command waits on the backend
///
/// Callers construct one only when output is interactive (not quiet, not
/// JSON), so the type itself stays unconditional.
pub struct ProgressIndicator {
    bar: ProgressBar,
}

impl ProgressIndicator {
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
    }

    #[test]
    fn truncate_marks_long_strings() {
        let out = truncate("https://example.com/a/very/long/path", 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let out = truncate("日本語のとても長いターゲット名", 8);
        assert_eq!(out.chars().count(), 8);
    }
}
