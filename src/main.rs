//! memsweep - stale-memory analyzer and archiver for agent workspaces.
//!
//! Usage:
//!   msw <WORKSPACE>...             Report memory age and volume
//!   msw --archive <WORKSPACE>...   Also move stale files into memory/archive
//!   msw --format json ...          Machine-readable output
//!
//! A workspace argument is either a bare path (the workspace is named
//! after its final component) or an explicit `name=path` pair.

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use memsweep_analyze::analyze_workspaces;
use memsweep_core::{AnalyzeConfig, MemoryReport, STALE_AFTER_DAYS, Workspace};

#[derive(Parser)]
#[command(
    name = "memsweep",
    version,
    about = "Analyze and archive stale agent workspace memory files",
    long_about = "memsweep inspects the memory subtree of each given workspace, \
                  reports daily-log counts, volume, and age, and can relocate \
                  files older than 30 days into memory/archive."
)]
struct Cli {
    /// Workspaces to analyze, as `path` or `name=path`
    #[arg(required = true)]
    workspaces: Vec<String>,

    /// Move stale files into the archive subtree
    #[arg(short, long)]
    archive: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let workspaces = cli
        .workspaces
        .iter()
        .map(|spec| parse_workspace(spec))
        .collect::<Result<Vec<_>>>()?;

    let config = AnalyzeConfig::builder()
        .archive(cli.archive)
        .build()
        .map_err(|e| eyre!("invalid configuration: {e}"))?;

    let reports = analyze_workspaces(&workspaces, &config).await?;

    match cli.format {
        OutputFormat::Text => print_reports(&reports, cli.archive),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    Ok(())
}

/// Parse a workspace spec: `name=path` or a bare path.
fn parse_workspace(spec: &str) -> Result<Workspace> {
    match spec.split_once('=') {
        Some((name, path)) => {
            if name.is_empty() || path.is_empty() {
                return Err(eyre!("invalid workspace spec: {spec}"));
            }
            Ok(Workspace::new(name, path))
        }
        None => {
            if spec.is_empty() {
                return Err(eyre!("empty workspace path"));
            }
            Ok(Workspace::from_root(spec))
        }
    }
}

/// Print the report table in configuration order.
fn print_reports(reports: &[MemoryReport], archive: bool) {
    println!();
    println!("{}", "─".repeat(78));
    println!(" Workspace Memory Report (stale after {STALE_AFTER_DAYS} days)");
    println!("{}", "─".repeat(78));
    println!(
        " {:<14} {:>6} {:>6} {:>10}  {:<10}  {:<10} {:>8}",
        "WORKSPACE", "LOGS", "STALE", "SIZE", "OLDEST", "NEWEST", "ARCHIVED"
    );

    for report in reports {
        if !report.exists {
            println!(
                " {:<14} (no memory directory at {})",
                report.workspace,
                report.memory_path.display()
            );
            continue;
        }

        println!(
            " {:<14} {:>6} {:>6} {:>10}  {:<10}  {:<10} {:>8}",
            report.workspace,
            report.daily_log_count,
            report.stale_count,
            format_size(report.total_size_bytes),
            format_date(report.oldest_ms),
            format_date(report.newest_ms),
            report.archived_count,
        );
    }

    let failures: Vec<&MemoryReport> = reports.iter().filter(|r| r.failure.is_some()).collect();
    if !failures.is_empty() {
        println!();
        for report in failures {
            if let Some(failure) = &report.failure {
                println!(" ! {}: {failure}", report.workspace);
            }
        }
    }

    if archive {
        let archived: u64 = reports.iter().map(|r| r.archived_count).sum();
        println!();
        println!(" {archived} file(s) archived");
    }
    println!();
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format an epoch-millisecond timestamp as a calendar date.
fn format_date(millis: Option<i64>) -> String {
    millis
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_path() {
        let ws = parse_workspace("/srv/agents/athena").unwrap();
        assert_eq!(ws.name, "athena");
    }

    #[test]
    fn test_parse_named_spec() {
        let ws = parse_workspace("scout=/srv/agents/scout-main").unwrap();
        assert_eq!(ws.name, "scout");
        assert_eq!(ws.root, std::path::PathBuf::from("/srv/agents/scout-main"));
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!(parse_workspace("=path").is_err());
        assert!(parse_workspace("name=").is_err());
        assert!(parse_workspace("").is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some(0)), "1970-01-01");
        assert_eq!(format_date(Some(1_700_000_000_000)), "2023-11-14");
    }
}
