//! Report command - render the three summary reports.

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use registrar::report::write_delimited;
use registrar::{Report, Repository, Severity, TableRow};

use crate::cli::{OutputFormat, Section, SourceArgs};
use crate::table::Table;

pub fn run(
    dir: PathBuf,
    source: SourceArgs,
    format: OutputFormat,
    only: Option<Section>,
    strict: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()).into());
    }
    let config = source.resolve()?;
    let repo = Repository::load(&dir, &config);

    let wants = |section: Section| only.is_none_or(|s| s == section);
    let show_majors = config.majors.is_some() && wants(Section::Majors);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Report::from(&repo))?);
        }
        OutputFormat::Table => {
            if show_majors {
                print_section("Majors Summary", &repo.major_rows());
            }
            if wants(Section::Students) {
                print_section("Student Summary", &repo.student_rows());
            }
            if wants(Section::Instructors) {
                print_section("Instructor Summary", &repo.instructor_rows());
            }

            if verbose || !repo.report().diagnostics.is_empty() {
                eprintln!("{}", "Load summary:".yellow().bold());
                super::print_load_report(repo.report(), verbose);
            }
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let delimiter = if matches!(format, OutputFormat::Tsv) {
                b'\t'
            } else {
                b','
            };
            let mut out = std::io::stdout().lock();
            let mut first = true;
            if show_majors {
                write_block(&mut out, delimiter, &repo.major_rows(), &mut first)?;
            }
            if wants(Section::Students) {
                write_block(&mut out, delimiter, &repo.student_rows(), &mut first)?;
            }
            if wants(Section::Instructors) {
                write_block(&mut out, delimiter, &repo.instructor_rows(), &mut first)?;
            }
        }
    }

    if strict && repo.report().has_errors() {
        return Err(format!(
            "{} rows or files were rejected",
            repo.report().count(Severity::Error)
        )
        .into());
    }
    Ok(())
}

fn print_section<T: TableRow>(title: &str, rows: &[T]) {
    println!("{}", title.cyan().bold());
    println!("{}", Table::from_rows(rows).render_colored());
    println!();
}

/// Write one delimited report, separated from the previous one by a blank line.
fn write_block<T: TableRow>(
    out: &mut impl Write,
    delimiter: u8,
    rows: &[T],
    first: &mut bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !std::mem::take(first) {
        writeln!(out)?;
    }
    write_delimited(&mut *out, delimiter, rows)?;
    Ok(())
}
