//! Instructor course loads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An instructor and how many students they taught per course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    cwid: String,
    name: String,
    dept: String,
    courses: IndexMap<String, usize>,
}

impl Instructor {
    pub fn new(cwid: impl Into<String>, name: impl Into<String>, dept: impl Into<String>) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            dept: dept.into(),
            courses: IndexMap::new(),
        }
    }

    /// Count one more student in `course`.
    pub fn add_course(&mut self, course: &str) {
        *self.courses.entry(course.to_string()).or_insert(0) += 1;
    }

    pub fn cwid(&self) -> &str {
        &self.cwid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dept(&self) -> &str {
        &self.dept
    }

    /// Student count per course, in the order courses were first taught.
    pub fn courses(&self) -> &IndexMap<String, usize> {
        &self.courses
    }

    pub fn students_in(&self, course: &str) -> usize {
        self.courses.get(course).copied().unwrap_or(0)
    }
}
