//! Repository: loads the registrar files and owns every entity.

use std::path::Path;

use indexmap::IndexMap;

use crate::config::{RepositoryConfig, SourceConfig};
use crate::diagnostics::{
    Diagnostic, DiagnosticKind, LoadPhase, LoadReport, PhaseStatus, PhaseSummary, Severity,
};
use crate::error::{RegistrarError, Result};
use crate::input::{ReaderConfig, RecordReader};
use crate::model::{Instructor, Major, Student};

/// Problems found in a single row.
#[derive(Default)]
struct RowIssues(Vec<(DiagnosticKind, String)>);

impl RowIssues {
    fn error(&mut self, error: RegistrarError) {
        self.0.push((error.kind(), error.to_string()));
    }

    fn note(&mut self, kind: DiagnosticKind, message: String) {
        self.0.push((kind, message));
    }
}

/// In-memory model of majors, students and instructors.
///
/// Entities refer to each other by identifier only. All maps keep insertion
/// order, which is also report order.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    majors: IndexMap<String, Major>,
    students: IndexMap<String, Student>,
    instructors: IndexMap<String, Instructor>,
    track_majors: bool,
    report: LoadReport,
}

impl Repository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every configured file from `dir`.
    ///
    /// Never fails: file-level errors end only their own phase, and every
    /// problem ends up in [`Repository::report`].
    pub fn load(dir: impl AsRef<Path>, config: &RepositoryConfig) -> Self {
        let dir = dir.as_ref();
        let mut repo = Self::new();

        match &config.majors {
            Some(source) => repo.load_configured(LoadPhase::Majors, dir, source),
            None => repo.report.phases.push(PhaseSummary {
                status: PhaseStatus::Skipped,
                ..PhaseSummary::new(LoadPhase::Majors, dir.to_path_buf())
            }),
        }
        repo.load_configured(LoadPhase::Students, dir, &config.students);
        repo.load_configured(LoadPhase::Instructors, dir, &config.instructors);
        repo.load_configured(LoadPhase::Grades, dir, &config.grades);

        log::debug!(
            "loaded {} majors, {} students, {} instructors with {} diagnostics",
            repo.majors.len(),
            repo.students.len(),
            repo.instructors.len(),
            repo.report.diagnostics.len()
        );
        repo
    }

    fn load_configured(&mut self, phase: LoadPhase, dir: &Path, source: &SourceConfig) {
        let path = dir.join(&source.file_name);
        let config = match source.reader_config() {
            Ok(config) => config,
            Err(e) => {
                self.abort(PhaseSummary::new(phase, path), &e);
                return;
            }
        };

        let result = match phase {
            LoadPhase::Majors => self.load_majors(&path, config),
            LoadPhase::Students => self.load_students(&path, config),
            LoadPhase::Instructors => self.load_instructors(&path, config),
            LoadPhase::Grades => self.load_grades(&path, config),
        };
        if let Err(e) = result {
            log::debug!("{} phase aborted: {}", phase.label(), e);
        }
    }

    /// Read `(dept, flag, course)` rows.
    ///
    /// Once this phase has run, students must name a known major.
    pub fn load_majors(
        &mut self,
        path: impl AsRef<Path>,
        config: ReaderConfig,
    ) -> Result<PhaseSummary> {
        self.track_majors = true;
        self.run_phase::<3, _>(
            LoadPhase::Majors,
            path.as_ref(),
            config,
            |repo, [dept, flag, course], issues| {
                let major = repo
                    .majors
                    .entry(dept.clone())
                    .or_insert_with(|| Major::new(dept));
                if let Err(e) = major.add_course(&course, &flag) {
                    issues.error(e);
                }
            },
        )
    }

    /// Read `(cwid, name, major)` rows.
    pub fn load_students(
        &mut self,
        path: impl AsRef<Path>,
        config: ReaderConfig,
    ) -> Result<PhaseSummary> {
        self.run_phase::<3, _>(
            LoadPhase::Students,
            path.as_ref(),
            config,
            |repo, [cwid, name, major], issues| {
                let student = if repo.track_majors {
                    match repo.majors.get(&major) {
                        Some(major) => Student::enrolled(cwid.clone(), name, major),
                        None => {
                            issues.error(RegistrarError::UnknownMajor { cwid, major });
                            return;
                        }
                    }
                } else {
                    Student::new(cwid.clone(), name, major)
                };

                if repo.students.insert(cwid.clone(), student).is_some() {
                    issues.note(
                        DiagnosticKind::DuplicateRecord,
                        format!("Student {} listed twice; keeping the later row", cwid),
                    );
                }
            },
        )
    }

    /// Read `(cwid, name, dept)` rows.
    pub fn load_instructors(
        &mut self,
        path: impl AsRef<Path>,
        config: ReaderConfig,
    ) -> Result<PhaseSummary> {
        self.run_phase::<3, _>(
            LoadPhase::Instructors,
            path.as_ref(),
            config,
            |repo, [cwid, name, dept], issues| {
                let instructor = Instructor::new(cwid.clone(), name, dept);
                if repo.instructors.insert(cwid.clone(), instructor).is_some() {
                    issues.note(
                        DiagnosticKind::DuplicateRecord,
                        format!("Instructor {} listed twice; keeping the later row", cwid),
                    );
                }
            },
        )
    }

    /// Read `(student_cwid, course, grade, instructor_cwid)` rows.
    ///
    /// The student and instructor sides are applied independently; an
    /// unknown party on one side does not stop the other.
    pub fn load_grades(
        &mut self,
        path: impl AsRef<Path>,
        config: ReaderConfig,
    ) -> Result<PhaseSummary> {
        self.run_phase::<4, _>(
            LoadPhase::Grades,
            path.as_ref(),
            config,
            |repo, [student_cwid, course, grade, instructor_cwid], issues| {
                match repo.students.get_mut(&student_cwid) {
                    Some(student) => {
                        if let Err(e) = student.add_course(&course, &grade) {
                            issues.error(e);
                        }
                    }
                    None => issues.error(RegistrarError::UnknownStudent { cwid: student_cwid }),
                }

                match repo.instructors.get_mut(&instructor_cwid) {
                    Some(instructor) => instructor.add_course(&course),
                    None => issues.error(RegistrarError::UnknownInstructor {
                        cwid: instructor_cwid,
                    }),
                }
            },
        )
    }

    /// Stream `path` through `apply`, recording row issues and file errors.
    fn run_phase<const N: usize, F>(
        &mut self,
        phase: LoadPhase,
        path: &Path,
        config: ReaderConfig,
        mut apply: F,
    ) -> Result<PhaseSummary>
    where
        F: FnMut(&mut Self, [String; N], &mut RowIssues),
    {
        let mut summary = PhaseSummary::new(phase, path.to_path_buf());
        let mut records = match RecordReader::with_config(config).open::<N>(path) {
            Ok(records) => records,
            Err(e) => {
                self.abort(summary, &e);
                return Err(e);
            }
        };

        while let Some(record) = records.next() {
            let fields = match record {
                Ok(fields) => fields,
                Err(e) => {
                    self.abort(summary, &e);
                    return Err(e);
                }
            };
            summary.rows_read += 1;

            let mut issues = RowIssues::default();
            apply(self, fields, &mut issues);

            let line = Some(records.line());
            let mut rejected = false;
            for (kind, message) in issues.0 {
                rejected |= kind.severity() == Severity::Error;
                self.record(Diagnostic::new(phase, kind, line, message));
            }
            if rejected {
                summary.rows_rejected += 1;
            }
        }

        log::debug!(
            "{} phase read {} rows from '{}' ({} rejected)",
            phase.label(),
            summary.rows_read,
            path.display(),
            summary.rows_rejected
        );
        self.report.phases.push(summary.clone());
        Ok(summary)
    }

    fn abort(&mut self, mut summary: PhaseSummary, error: &RegistrarError) {
        let line = match error {
            RegistrarError::MalformedRecord { line, .. } | RegistrarError::Read { line, .. } => {
                Some(*line)
            }
            _ => None,
        };
        self.record(Diagnostic::from_error(summary.phase, line, error));
        summary.status = PhaseStatus::Aborted;
        self.report.phases.push(summary);
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.report.diagnostics.push(diagnostic);
    }

    /// Look up a major by department.
    pub fn major(&self, dept: &str) -> Option<&Major> {
        self.majors.get(dept)
    }

    /// Look up a student by CWID.
    pub fn student(&self, cwid: &str) -> Option<&Student> {
        self.students.get(cwid)
    }

    /// Look up an instructor by CWID.
    pub fn instructor(&self, cwid: &str) -> Option<&Instructor> {
        self.instructors.get(cwid)
    }

    pub fn majors(&self) -> impl Iterator<Item = &Major> {
        self.majors.values()
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn instructors(&self) -> impl Iterator<Item = &Instructor> {
        self.instructors.values()
    }

    /// Phase summaries and diagnostics gathered so far.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab() -> ReaderConfig {
        ReaderConfig::new(b'\t')
    }

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_bad_flag_row_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "majors.txt", "CS\tR\tCS101\nCS\tX\tCS999\nCS\tE\tCS301\n");

        let mut repo = Repository::new();
        let summary = repo.load_majors(&path, tab()).unwrap();

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_rejected, 1);
        let major = repo.major("CS").unwrap();
        assert_eq!(major.required().len(), 1);
        assert_eq!(major.electives().len(), 1);

        let diag = &repo.report().diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::InvalidFlag);
        assert_eq!(diag.line, Some(2));
    }

    #[test]
    fn test_students_without_majors_phase() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "students.txt", "1\tAda\tCS\n");

        let mut repo = Repository::new();
        repo.load_students(&path, tab()).unwrap();

        let student = repo.student("1").unwrap();
        assert_eq!(student.major(), "CS");
        assert!(student.remaining_required().is_empty());
        assert!(repo.report().diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_major_after_majors_phase() {
        let dir = tempfile::tempdir().unwrap();
        let majors = write(dir.path(), "majors.txt", "CS\tR\tCS101\n");
        let students = write(dir.path(), "students.txt", "1\tAda\tEE\n2\tGrace\tCS\n");

        let mut repo = Repository::new();
        repo.load_majors(&majors, tab()).unwrap();
        let summary = repo.load_students(&students, tab()).unwrap();

        assert_eq!(summary.rows_rejected, 1);
        assert!(repo.student("1").is_none());
        assert!(repo.student("2").is_some());
        assert_eq!(
            repo.report().of_kind(DiagnosticKind::UnknownMajor).count(),
            1
        );
    }

    #[test]
    fn test_duplicate_instructor_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "instructors.txt", "9\tOld\tCS\n9\tNew\tCS\n");

        let mut repo = Repository::new();
        repo.load_instructors(&path, tab()).unwrap();

        assert_eq!(repo.instructors().count(), 1);
        assert_eq!(repo.instructor("9").unwrap().name(), "New");
        let diag = &repo.report().diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::DuplicateRecord);
        assert_eq!(diag.severity, Severity::Info);
    }

    #[test]
    fn test_malformed_grades_keep_earlier_rows() {
        let dir = tempfile::tempdir().unwrap();
        let students = write(dir.path(), "students.txt", "1\tAda\tCS\n");
        let instructors = write(dir.path(), "instructors.txt", "9\tTuring\tCS\n");
        let grades = write(dir.path(), "grades.txt", "1\tCS101\tA\t9\n1\tCS201\tB\n1\tCS301\tA\t9\n");

        let mut repo = Repository::new();
        repo.load_students(&students, tab()).unwrap();
        repo.load_instructors(&instructors, tab()).unwrap();
        let err = repo.load_grades(&grades, tab()).unwrap_err();

        assert!(matches!(err, RegistrarError::MalformedRecord { line: 2, .. }));
        let student = repo.student("1").unwrap();
        assert!(student.completed().contains("CS101"));
        assert!(!student.completed().contains("CS301"));

        let summary = repo.report().phase(LoadPhase::Grades).unwrap();
        assert_eq!(summary.status, PhaseStatus::Aborted);
        assert_eq!(summary.rows_read, 1);
    }
}
