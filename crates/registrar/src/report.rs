//! Flat report rows for tabular rendering.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::diagnostics::LoadReport;
use crate::error::Result;
use crate::model::{Instructor, Major, Student};
use crate::repository::Repository;

/// Column headers for the majors report.
pub const MAJOR_COLUMNS: [&str; 3] = ["Dept", "Required", "Electives"];

/// Column headers for the students report.
pub const STUDENT_COLUMNS: [&str; 6] = [
    "CWID",
    "Name",
    "Major",
    "Completed Courses",
    "Remaining Required",
    "Remaining Electives",
];

/// Column headers for the instructors report.
pub const INSTRUCTOR_COLUMNS: [&str; 5] = ["CWID", "Name", "Dept", "Course", "Students"];

/// A report row that flattens to display cells.
pub trait TableRow {
    /// Column headers, one per cell.
    fn columns() -> &'static [&'static str];

    /// Cell text in column order.
    fn cells(&self) -> Vec<String>;
}

/// Render a course list as a single cell.
pub fn course_list(courses: &[String]) -> String {
    format!("[{}]", courses.join(", "))
}

/// Write `rows` with a header line as delimited text.
pub fn write_delimited<W: Write, T: TableRow>(
    writer: W,
    delimiter: u8,
    rows: &[T],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer.write_record(T::columns())?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// One row per major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorRow {
    pub dept: String,
    pub required: Vec<String>,
    pub electives: Vec<String>,
}

impl From<&Major> for MajorRow {
    fn from(major: &Major) -> Self {
        Self {
            dept: major.dept().to_string(),
            required: major.required().iter().cloned().collect(),
            electives: major.electives().iter().cloned().collect(),
        }
    }
}

impl TableRow for MajorRow {
    fn columns() -> &'static [&'static str] {
        &MAJOR_COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.dept.clone(),
            course_list(&self.required),
            course_list(&self.electives),
        ]
    }
}

/// One row per student. Course lists are sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    pub cwid: String,
    pub name: String,
    pub major: String,
    pub completed: Vec<String>,
    pub remaining_required: Vec<String>,
    /// `None` once the elective requirement is satisfied.
    pub remaining_electives: Option<Vec<String>>,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            cwid: student.cwid().to_string(),
            name: student.name().to_string(),
            major: student.major().to_string(),
            completed: student.completed().iter().cloned().collect(),
            remaining_required: student.remaining_required().iter().cloned().collect(),
            remaining_electives: student
                .remaining_electives()
                .courses()
                .map(|courses| courses.iter().cloned().collect()),
        }
    }
}

impl TableRow for StudentRow {
    fn columns() -> &'static [&'static str] {
        &STUDENT_COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.cwid.clone(),
            self.name.clone(),
            self.major.clone(),
            course_list(&self.completed),
            course_list(&self.remaining_required),
            self.remaining_electives
                .as_deref()
                .map(course_list)
                .unwrap_or_else(|| "None".to_string()),
        ]
    }
}

/// One row per (instructor, course) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorRow {
    pub cwid: String,
    pub name: String,
    pub dept: String,
    pub course: String,
    pub students: usize,
}

impl InstructorRow {
    /// Rows for every course `instructor` taught, in first-taught order.
    ///
    /// An instructor with no graded students yields no rows.
    pub fn for_instructor(
        instructor: &Instructor,
    ) -> impl Iterator<Item = InstructorRow> + '_ {
        instructor
            .courses()
            .iter()
            .map(move |(course, &students)| InstructorRow {
                cwid: instructor.cwid().to_string(),
                name: instructor.name().to_string(),
                dept: instructor.dept().to_string(),
                course: course.clone(),
                students,
            })
    }
}

impl TableRow for InstructorRow {
    fn columns() -> &'static [&'static str] {
        &INSTRUCTOR_COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.cwid.clone(),
            self.name.clone(),
            self.dept.clone(),
            self.course.clone(),
            self.students.to_string(),
        ]
    }
}

impl Repository {
    pub fn major_rows(&self) -> Vec<MajorRow> {
        self.majors().map(MajorRow::from).collect()
    }

    pub fn student_rows(&self) -> Vec<StudentRow> {
        self.students().map(StudentRow::from).collect()
    }

    pub fn instructor_rows(&self) -> Vec<InstructorRow> {
        self.instructors()
            .flat_map(InstructorRow::for_instructor)
            .collect()
    }
}

/// All three reports plus the load report, ready to serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub majors: Vec<MajorRow>,
    pub students: Vec<StudentRow>,
    pub instructors: Vec<InstructorRow>,
    pub load: LoadReport,
}

impl From<&Repository> for Report {
    fn from(repo: &Repository) -> Self {
        Self {
            majors: repo.major_rows(),
            students: repo.student_rows(),
            instructors: repo.instructor_rows(),
            load: repo.report().clone(),
        }
    }
}
