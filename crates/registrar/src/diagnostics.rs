//! Diagnostics collected while loading a repository.
//!
//! Row-level problems are recovered where they happen and recorded here;
//! file-level problems end their load phase and are recorded the same way.
//! Every diagnostic is also forwarded to the `log` facade.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistrarError;

/// The four load phases, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Majors,
    Students,
    Instructors,
    Grades,
}

impl LoadPhase {
    pub fn label(&self) -> &'static str {
        match self {
            LoadPhase::Majors => "majors",
            LoadPhase::Students => "students",
            LoadPhase::Instructors => "instructors",
            LoadPhase::Grades => "grades",
        }
    }
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Reference that did not resolve; the rest of the row was still applied.
    Warning,
    /// Row or file that was discarded.
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    SourceUnavailable,
    MalformedRecord,
    UnreadableRecord,
    Config,
    Output,
    InvalidFlag,
    InvalidGrade,
    UnknownMajor,
    UnknownStudent,
    UnknownInstructor,
    /// A CWID appeared twice; the later row replaced the earlier one.
    DuplicateRecord,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::SourceUnavailable
            | DiagnosticKind::MalformedRecord
            | DiagnosticKind::UnreadableRecord
            | DiagnosticKind::Config
            | DiagnosticKind::Output
            | DiagnosticKind::InvalidFlag
            | DiagnosticKind::InvalidGrade
            | DiagnosticKind::UnknownMajor => Severity::Error,
            DiagnosticKind::UnknownStudent | DiagnosticKind::UnknownInstructor => {
                Severity::Warning
            }
            DiagnosticKind::DuplicateRecord => Severity::Info,
        }
    }
}

/// A single recorded problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub phase: LoadPhase,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// 1-based source line, when the problem belongs to one row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        phase: LoadPhase,
        kind: DiagnosticKind,
        line: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            severity: kind.severity(),
            kind,
            line,
            message: message.into(),
        }
    }

    /// Build a diagnostic from a library error.
    pub fn from_error(phase: LoadPhase, line: Option<usize>, error: &RegistrarError) -> Self {
        Self::new(phase, error.kind(), line, error.to_string())
    }

    /// Forward to the `log` facade at the matching level.
    pub(crate) fn emit(&self) {
        let line = self.line.map(|l| format!(" (line {})", l)).unwrap_or_default();
        match self.severity {
            Severity::Error => log::error!("[{}]{} {}", self.phase.label(), line, self.message),
            Severity::Warning => log::warn!("[{}]{} {}", self.phase.label(), line, self.message),
            Severity::Info => log::info!("[{}]{} {}", self.phase.label(), line, self.message),
        }
    }
}

/// How a load phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    /// Every line was read; individual rows may still have been rejected.
    Completed,
    /// A file-level error stopped the phase early.
    Aborted,
    /// The phase was not configured.
    Skipped,
}

/// Outcome of one load phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub phase: LoadPhase,
    pub path: PathBuf,
    pub status: PhaseStatus,
    /// Data rows read, excluding any header.
    pub rows_read: usize,
    /// Rows discarded by a row-level error.
    pub rows_rejected: usize,
}

impl PhaseSummary {
    pub(crate) fn new(phase: LoadPhase, path: PathBuf) -> Self {
        Self {
            phase,
            path,
            status: PhaseStatus::Completed,
            rows_read: 0,
            rows_rejected: 0,
        }
    }
}

/// Everything recorded while loading a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub loaded_at: DateTime<Utc>,
    pub phases: Vec<PhaseSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self {
            loaded_at: Utc::now(),
            phases: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Summary for `phase`, if it ran.
    pub fn phase(&self, phase: LoadPhase) -> Option<&PhaseSummary> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl Default for LoadReport {
    fn default() -> Self {
        Self::new()
    }
}
