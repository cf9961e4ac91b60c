//! Student progress through a major.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::grade::LetterGrade;
use super::major::Major;
use crate::error::{RegistrarError, Result};

/// Electives a student still owes.
///
/// Passing any one outstanding elective satisfies the whole requirement, so
/// the set collapses to `Satisfied` rather than losing a single member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingElectives {
    Outstanding(BTreeSet<String>),
    Satisfied,
}

impl RemainingElectives {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, RemainingElectives::Satisfied)
    }

    /// Outstanding electives, or `None` once satisfied.
    pub fn courses(&self) -> Option<&BTreeSet<String>> {
        match self {
            RemainingElectives::Outstanding(courses) => Some(courses),
            RemainingElectives::Satisfied => None,
        }
    }
}

/// A student and the courses they have taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    cwid: String,
    name: String,
    major: String,
    grades: IndexMap<String, LetterGrade>,
    completed: BTreeSet<String>,
    remaining_required: BTreeSet<String>,
    remaining_electives: RemainingElectives,
}

impl Student {
    /// Create a student with no outstanding requirements.
    pub fn new(cwid: impl Into<String>, name: impl Into<String>, major: impl Into<String>) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            major: major.into(),
            grades: IndexMap::new(),
            completed: BTreeSet::new(),
            remaining_required: BTreeSet::new(),
            remaining_electives: RemainingElectives::Outstanding(BTreeSet::new()),
        }
    }

    /// Create a student owing every requirement of `major`.
    pub fn enrolled(cwid: impl Into<String>, name: impl Into<String>, major: &Major) -> Self {
        let mut student = Self::new(cwid, name, major.dept());
        student.remaining_required = major.required().clone();
        student.remaining_electives = RemainingElectives::Outstanding(major.electives().clone());
        student
    }

    /// Record a grade for `course`.
    ///
    /// Unrecognized grades are rejected before any state changes. Failing
    /// grades are recorded but leave the course outstanding.
    pub fn add_course(&mut self, course: &str, grade: &str) -> Result<()> {
        let grade = LetterGrade::parse(grade).ok_or_else(|| RegistrarError::InvalidGrade {
            course: course.to_string(),
            grade: grade.to_string(),
        })?;

        self.grades.insert(course.to_string(), grade);
        if !grade.is_passing() {
            return Ok(());
        }

        self.completed.insert(course.to_string());
        self.remaining_required.remove(course);
        let elective = matches!(
            &self.remaining_electives,
            RemainingElectives::Outstanding(electives) if electives.contains(course)
        );
        if elective {
            self.remaining_electives = RemainingElectives::Satisfied;
        }
        Ok(())
    }

    pub fn cwid(&self) -> &str {
        &self.cwid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Department identifier of the student's major.
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Latest recorded grade for `course`.
    pub fn grade(&self, course: &str) -> Option<LetterGrade> {
        self.grades.get(course).copied()
    }

    /// Every recorded grade, in the order courses were first seen.
    pub fn grades(&self) -> &IndexMap<String, LetterGrade> {
        &self.grades
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn remaining_required(&self) -> &BTreeSet<String> {
        &self.remaining_required
    }

    pub fn remaining_electives(&self) -> &RemainingElectives {
        &self.remaining_electives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cs_major() -> Major {
        let mut major = Major::new("CS");
        major.add_course("CS101", "R").unwrap();
        major.add_course("CS201", "R").unwrap();
        major.add_course("E1", "E").unwrap();
        major.add_course("E2", "E").unwrap();
        major.add_course("E3", "E").unwrap();
        major
    }

    #[test]
    fn test_enrolled_copies_requirements() {
        let major = cs_major();
        let student = Student::enrolled("1", "Ada", &major);

        assert_eq!(student.major(), "CS");
        assert_eq!(student.remaining_required(), major.required());
        assert_eq!(student.remaining_electives().courses(), Some(major.electives()));
    }

    #[test]
    fn test_passing_required_course() {
        let mut student = Student::enrolled("1", "Ada", &cs_major());
        student.add_course("CS101", "A").unwrap();

        assert!(student.completed().contains("CS101"));
        assert!(!student.remaining_required().contains("CS101"));
        assert!(student.remaining_required().contains("CS201"));
        assert!(!student.remaining_electives().is_satisfied());
    }

    #[test]
    fn test_one_elective_satisfies_all() {
        let mut student = Student::enrolled("1", "Ada", &cs_major());
        student.add_course("E2", "B").unwrap();

        assert_eq!(student.remaining_electives(), &RemainingElectives::Satisfied);
        assert_eq!(student.remaining_electives().courses(), None);
    }

    #[test]
    fn test_failing_grade_keeps_course_outstanding() {
        let mut student = Student::enrolled("1", "Ada", &cs_major());
        student.add_course("CS101", "C-").unwrap();
        student.add_course("E1", "F").unwrap();

        assert!(student.completed().is_empty());
        assert!(student.remaining_required().contains("CS101"));
        assert!(!student.remaining_electives().is_satisfied());
        assert_eq!(student.grade("CS101"), Some(LetterGrade::CMinus));
    }

    #[test]
    fn test_invalid_grade_changes_nothing() {
        let mut student = Student::enrolled("1", "Ada", &cs_major());
        let before = student.clone();

        let err = student.add_course("CS101", "Z").unwrap_err();

        assert!(matches!(err, RegistrarError::InvalidGrade { ref grade, .. } if grade == "Z"));
        assert_eq!(student, before);
    }

    #[test]
    fn test_course_outside_major_still_completes() {
        let mut student = Student::enrolled("1", "Ada", &cs_major());
        student.add_course("MA 101", "A-").unwrap();

        assert!(student.completed().contains("MA 101"));
        assert_eq!(student.remaining_required().len(), 2);
    }

    #[test]
    fn test_retake_records_latest_grade() {
        let mut student = Student::enrolled("1", "Ada", &cs_major());
        student.add_course("CS201", "F").unwrap();
        student.add_course("CS201", "B+").unwrap();

        assert_eq!(student.grade("CS201"), Some(LetterGrade::BPlus));
        assert!(student.completed().contains("CS201"));
        assert_eq!(student.grades().len(), 1);
    }
}
