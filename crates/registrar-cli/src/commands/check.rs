//! Check command - load a data directory and report problems only.

use std::path::PathBuf;

use colored::Colorize;
use registrar::Repository;

use crate::cli::SourceArgs;

pub fn run(
    dir: PathBuf,
    source: SourceArgs,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()).into());
    }
    let config = source.resolve()?;
    let repo = Repository::load(&dir, &config);

    if json_output {
        println!("{}", serde_json::to_string_pretty(repo.report())?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Checked".cyan().bold(),
        dir.display().to_string().white()
    );
    println!(
        "  {} majors, {} students, {} instructors",
        repo.majors().count(),
        repo.students().count(),
        repo.instructors().count()
    );
    super::print_load_report(repo.report(), verbose);

    Ok(())
}
