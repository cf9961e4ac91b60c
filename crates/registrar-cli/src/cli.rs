//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use registrar::RepositoryConfig;

/// Registrar: summary reports from registrar data files
#[derive(Parser)]
#[command(name = "registrar")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a data directory and print the majors, students and instructors reports
    Report {
        /// Directory holding majors.txt, students.txt, instructors.txt and grades.txt
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Print only one report
        #[arg(long, value_name = "SECTION")]
        only: Option<Section>,

        /// Exit with status 1 if any row or file was rejected
        #[arg(long)]
        strict: bool,
    },

    /// Load a data directory and show only phase summaries and diagnostics
    Check {
        /// Directory holding the data files
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options selecting how the data files are read.
#[derive(Args)]
pub struct SourceArgs {
    /// JSON file overriding file names, separators and headers
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat every file as tab-separated
    #[arg(long, conflicts_with = "config")]
    pub tabs: bool,

    /// Load without a majors file (no requirement tracking)
    #[arg(long)]
    pub no_majors: bool,

    /// Files have no header line
    #[arg(long)]
    pub no_header: bool,
}

impl SourceArgs {
    /// Resolve the repository configuration these options describe.
    pub fn resolve(&self) -> registrar::Result<RepositoryConfig> {
        let mut config = match (&self.config, self.tabs) {
            (Some(path), _) => RepositoryConfig::from_json_file(path)?,
            (None, true) => RepositoryConfig::tab_separated(),
            (None, false) => RepositoryConfig::default(),
        };
        if self.no_majors {
            config = config.without_majors();
        }
        if self.no_header {
            config = config.with_header(false);
        }
        Ok(config)
    }
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table, tsv, csv, or json.", s)),
        }
    }
}

/// One of the three reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Majors,
    Students,
    Instructors,
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "majors" => Ok(Section::Majors),
            "students" => Ok(Section::Students),
            "instructors" => Ok(Section::Instructors),
            _ => Err(format!(
                "Unknown section: {}. Use majors, students, or instructors.",
                s
            )),
        }
    }
}
