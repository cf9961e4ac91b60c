//! CLI command implementations.

pub mod check;
pub mod report;

use colored::Colorize;
use registrar::{LoadReport, PhaseStatus, Severity};

/// Print phase summaries and, when verbose, every diagnostic to stderr.
pub(crate) fn print_load_report(report: &LoadReport, verbose: bool) {
    for phase in &report.phases {
        let status = match phase.status {
            PhaseStatus::Completed => "ok".green(),
            PhaseStatus::Aborted => "aborted".red(),
            PhaseStatus::Skipped => "skipped".dimmed(),
        };
        eprintln!(
            "  {:12} {:8} {} rows, {} rejected  {}",
            phase.phase.label(),
            status,
            phase.rows_read,
            phase.rows_rejected,
            phase.path.display().to_string().dimmed()
        );
    }

    if verbose {
        for diag in &report.diagnostics {
            let label = match diag.severity {
                Severity::Error => diag.severity.label().red().bold(),
                Severity::Warning => diag.severity.label().yellow().bold(),
                Severity::Info => diag.severity.label().blue(),
            };
            let line = diag.line.map(|l| format!(":{}", l)).unwrap_or_default();
            eprintln!("  {} [{}{}] {}", label, diag.phase.label(), line, diag.message);
        }
    } else if !report.diagnostics.is_empty() {
        eprintln!(
            "  {} errors, {} warnings, {} notes (use --verbose to list)",
            report.count(Severity::Error).to_string().red(),
            report.count(Severity::Warning).to_string().yellow(),
            report.count(Severity::Info)
        );
    }
}
