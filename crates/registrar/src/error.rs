//! Error types for the Registrar library.

use std::path::PathBuf;
use thiserror::Error;

use crate::diagnostics::DiagnosticKind;

/// Main error type for Registrar operations.
///
/// File-level errors (`SourceUnavailable`, `Read`, `MalformedRecord`) abort
/// the load phase that hit them. Row-level errors only discard the offending
/// row.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The source file could not be opened.
    #[error("Can't open '{path}': {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O or UTF-8 failure partway through a source.
    #[error("Failed reading '{path}' at line {line}: {source}")]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A line has the wrong number of fields.
    #[error("'{path}' has {actual} fields on line {line} but expected {expected}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        actual: usize,
        expected: usize,
    },

    /// Error writing delimited report output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requirement flag other than `R` or `E`.
    #[error("Invalid flag '{flag}' for course {course}")]
    InvalidFlag { course: String, flag: String },

    /// Letter grade outside the passing and failing whitelists.
    #[error("Invalid grade '{grade}' for course {course}")]
    InvalidGrade { course: String, grade: String },

    /// Student references a major that was never loaded.
    #[error("No major named {major} for student {cwid}")]
    UnknownMajor { cwid: String, major: String },

    /// Grade row references a student that was never loaded.
    #[error("Found grade for unknown student {cwid}")]
    UnknownStudent { cwid: String },

    /// Grade row references an instructor that was never loaded.
    #[error("Found grade for unknown instructor {cwid}")]
    UnknownInstructor { cwid: String },
}

impl RegistrarError {
    /// Whether this error aborts an entire load phase.
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            RegistrarError::SourceUnavailable { .. }
                | RegistrarError::Read { .. }
                | RegistrarError::MalformedRecord { .. }
        )
    }

    /// Serializable tag for this error.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            RegistrarError::SourceUnavailable { .. } => DiagnosticKind::SourceUnavailable,
            RegistrarError::MalformedRecord { .. } => DiagnosticKind::MalformedRecord,
            RegistrarError::Read { .. } => DiagnosticKind::UnreadableRecord,
            RegistrarError::Csv(_) => DiagnosticKind::Output,
            RegistrarError::Json(_) | RegistrarError::Config(_) => DiagnosticKind::Config,
            RegistrarError::InvalidFlag { .. } => DiagnosticKind::InvalidFlag,
            RegistrarError::InvalidGrade { .. } => DiagnosticKind::InvalidGrade,
            RegistrarError::UnknownMajor { .. } => DiagnosticKind::UnknownMajor,
            RegistrarError::UnknownStudent { .. } => DiagnosticKind::UnknownStudent,
            RegistrarError::UnknownInstructor { .. } => DiagnosticKind::UnknownInstructor,
        }
    }
}

/// Result type alias for Registrar operations.
pub type Result<T> = std::result::Result<T, RegistrarError>;
