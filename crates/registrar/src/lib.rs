//! Registrar: an in-memory model of majors, students and instructors built
//! from delimited text files.
//!
//! A [`Repository`] reads up to four files in dependency order (majors,
//! students, instructors, grades), cross-references grade rows against the
//! students and instructors it knows, and tracks each student's remaining
//! required and elective courses.
//!
//! # Failure Model
//!
//! - **Row-level** problems (bad flag, bad grade, unknown CWID or major) drop
//!   the row and are recorded as [`Diagnostic`]s.
//! - **File-level** problems (missing file, wrong field count) end the phase
//!   reading that file; later phases still run.
//!
//! # Example
//!
//! ```no_run
//! use registrar::{Repository, RepositoryConfig};
//!
//! let repo = Repository::load("data", &RepositoryConfig::default());
//!
//! for row in repo.student_rows() {
//!     println!("{} {:?}", row.cwid, row.remaining_required);
//! }
//! println!("Diagnostics: {}", repo.report().diagnostics.len());
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod model;
pub mod report;

mod repository;

pub use crate::repository::Repository;
pub use config::{RepositoryConfig, SourceConfig};
pub use diagnostics::{
    Diagnostic, DiagnosticKind, LoadPhase, LoadReport, PhaseStatus, PhaseSummary, Severity,
};
pub use error::{RegistrarError, Result};
pub use input::{ReaderConfig, RecordReader, Records};
pub use model::{CourseFlag, Instructor, LetterGrade, Major, RemainingElectives, Student};
pub use report::{InstructorRow, MajorRow, Report, StudentRow, TableRow};
