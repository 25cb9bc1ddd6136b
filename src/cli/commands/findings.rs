//! Findings Command - Browse findings of a scan

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;
use crate::domain::scan::entities::Severity;

/// Arguments for the findings command
#[derive(Args, Debug)]
pub struct FindingsArgs {
    /// Scan id to fetch findings for
    pub scan_id: String,

    /// Only show findings of this severity (filtered by the backend)
    #[arg(long, short, value_enum)]
    pub severity: Option<SeverityArg>,
}

/// Severity filter accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeverityArg {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl From<SeverityArg> for Severity {
    fn from(s: SeverityArg) -> Self {
        match s {
            SeverityArg::Critical => Severity::Critical,
            SeverityArg::High => Severity::High,
            SeverityArg::Medium => Severity::Medium,
            SeverityArg::Low => Severity::Low,
            SeverityArg::Info => Severity::Info,
        }
    }
}

/// Run the findings command
pub async fn run(ctx: &CliContext, _cli: &Cli, args: &FindingsArgs) -> Result<i32> {
    let severity = args.severity.map(Severity::from);

    let findings = match ctx.client.get_findings(&args.scan_id, severity).await {
        Ok(findings) => findings,
        Err(e) => {
            ctx.output.error(&format!("Failed to fetch findings: {}", e));
            return Ok(super::backend_exit_code(&e));
        }
    };

    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&findings)?,
        _ => {
            if findings.is_empty() {
                match severity {
                    Some(severity) => ctx.output.success(&format!(
                        "No {severity} findings for scan {}",
                        args.scan_id
                    )),
                    None => ctx
                        .output
                        .success(&format!("No findings for scan {}", args.scan_id)),
                }
            } else {
                ctx.output.print_findings_table(&findings);
                ctx.output.print(&format!("\n{} findings", findings.len()));
            }
        }
    }

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_arg_maps_to_domain_severity() {
        assert_eq!(Severity::from(SeverityArg::Critical), Severity::Critical);
        assert_eq!(Severity::from(SeverityArg::High), Severity::High);
        assert_eq!(Severity::from(SeverityArg::Medium), Severity::Medium);
        assert_eq!(Severity::from(SeverityArg::Low), Severity::Low);
        assert_eq!(Severity::from(SeverityArg::Info), Severity::Info);
    }

    #[test]
    fn test_severity_arg_parses_lowercase() {
        let parsed = SeverityArg::from_str("high", true).expect("parses");
        assert_eq!(parsed, SeverityArg::High);
    }
}
