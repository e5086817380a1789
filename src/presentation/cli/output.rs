use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::domain::entities::DeployReport;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Exit status of one operation on one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRow {
    pub repository: String,
    pub operation: String,
    pub status: i32,
}

/// Exit statuses of the deploy commands of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployRow {
    pub repository: String,
    pub commands: Vec<String>,
    pub statuses: Vec<i32>,
}

impl DeployRow {
    pub fn is_success(&self) -> bool {
        self.statuses.iter().all(|status| *status == 0)
    }
}

/// Print `value` as JSON or YAML. Returns false for text output, which
/// callers render themselves.
pub fn print_structured<T: Serialize + ?Sized>(format: OutputFormat, value: &T) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(true)
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(value)?);
            Ok(true)
        }
        OutputFormat::Text => Ok(false),
    }
}

pub fn status_marker(status: i32) -> ColoredString {
    if status == 0 {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    }
}

pub fn print_operation_rows(format: OutputFormat, rows: &[OperationRow]) -> Result<()> {
    if print_structured(format, rows)? {
        return Ok(());
    }

    for row in rows {
        let status = if row.status == 0 {
            "ok".green()
        } else {
            format!("exit code {}", row.status).red()
        };
        println!(
            "{} {} {}: {}",
            status_marker(row.status),
            row.operation.cyan(),
            row.repository.bold(),
            status
        );
    }
    Ok(())
}

pub fn print_deploy_rows(format: OutputFormat, rows: &[DeployRow]) -> Result<()> {
    if print_structured(format, rows)? {
        return Ok(());
    }

    for row in rows {
        let overall = if row.is_success() { 0 } else { 1 };
        println!("{} {}", status_marker(overall), row.repository.bold());
        if row.commands.is_empty() {
            println!("  {}", "no deploy commands".dimmed());
        }
        for (command, status) in row.commands.iter().zip(&row.statuses) {
            println!("  {} {} [{}]", status_marker(*status), command, status);
        }
    }
    Ok(())
}

pub fn print_reports(format: OutputFormat, reports: &[DeployReport]) -> Result<()> {
    if print_structured(format, reports)? {
        return Ok(());
    }

    for report in reports {
        let name = match &report.path {
            Some(path) => path.display().to_string(),
            None => report.url.clone(),
        };
        println!(
            "{} {} ({})",
            status_marker(if report.is_success() { 0 } else { 1 }),
            name.bold(),
            report.branch.blue()
        );
        if let Some(key_status) = report.key_status {
            println!("  ssh key: {}", key_status);
        }
        println!("  {}: {}", report.operation.to_string().cyan(), report.sync_status);
        if !report.deploy_statuses.is_empty() {
            let statuses: Vec<String> = report.deploy_statuses.iter().map(|s| s.to_string()).collect();
            let failed = report.failed_deploy_count();
            if failed == 0 {
                println!("  deploy: [{}]", statuses.join(", "));
            } else {
                println!("  deploy: [{}] {}", statuses.join(", "), format!("{} failed", failed).red());
            }
        }
        let elapsed = report.finished_at - report.started_at;
        println!("  {}", format!("took {} ms", elapsed.num_milliseconds()).dimmed());
    }
    Ok(())
}
