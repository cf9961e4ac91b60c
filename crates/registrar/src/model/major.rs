//! Major requirement sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grade::CourseFlag;
use crate::error::{RegistrarError, Result};

/// A department's required and elective courses.
///
/// A course sits in at most one of the two sets; reclassifying it moves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    dept: String,
    required: BTreeSet<String>,
    electives: BTreeSet<String>,
}

impl Major {
    pub fn new(dept: impl Into<String>) -> Self {
        Self {
            dept: dept.into(),
            required: BTreeSet::new(),
            electives: BTreeSet::new(),
        }
    }

    /// Classify `course` using the raw flag from the majors file.
    pub fn add_course(&mut self, course: &str, flag: &str) -> Result<()> {
        let flag = CourseFlag::parse(flag).ok_or_else(|| RegistrarError::InvalidFlag {
            course: course.to_string(),
            flag: flag.to_string(),
        })?;
        self.classify(course, flag);
        Ok(())
    }

    /// Classify `course`; the latest classification wins.
    pub fn classify(&mut self, course: &str, flag: CourseFlag) {
        let (target, other) = match flag {
            CourseFlag::Required => (&mut self.required, &mut self.electives),
            CourseFlag::Elective => (&mut self.electives, &mut self.required),
        };
        other.remove(course);
        target.insert(course.to_string());
    }

    pub fn dept(&self) -> &str {
        &self.dept
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn electives(&self) -> &BTreeSet<String> {
        &self.electives
    }
}
