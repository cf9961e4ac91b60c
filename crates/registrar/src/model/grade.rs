//! Closed vocabularies for requirement flags and letter grades.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a major classifies one of its courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseFlag {
    /// Mandatory for every student in the major (`R`).
    Required,
    /// One of the alternatives satisfying the elective requirement (`E`).
    Elective,
}

impl CourseFlag {
    /// Parse the single-letter flag used in the majors file.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "R" => Some(CourseFlag::Required),
            "E" => Some(CourseFlag::Elective),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CourseFlag::Required => "R",
            CourseFlag::Elective => "E",
        }
    }
}

/// Letter grades accepted in the grades file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    EPlus,
    E,
    EMinus,
    FPlus,
    F,
    FMinus,
}

impl LetterGrade {
    /// Grades that complete a course.
    pub const PASSING: [LetterGrade; 7] = [
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
    ];

    /// Recognized grades that leave a course outstanding.
    pub const FAILING: [LetterGrade; 10] = [
        LetterGrade::CMinus,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::DMinus,
        LetterGrade::EPlus,
        LetterGrade::E,
        LetterGrade::EMinus,
        LetterGrade::FPlus,
        LetterGrade::F,
        LetterGrade::FMinus,
    ];

    /// Parse a grade exactly as written; no trimming or case folding.
    pub fn parse(value: &str) -> Option<Self> {
        Self::PASSING
            .iter()
            .chain(Self::FAILING.iter())
            .copied()
            .find(|grade| grade.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::EPlus => "E+",
            LetterGrade::E => "E",
            LetterGrade::EMinus => "E-",
            LetterGrade::FPlus => "F+",
            LetterGrade::F => "F",
            LetterGrade::FMinus => "F-",
        }
    }

    /// Returns true if this grade completes the course.
    pub fn is_passing(&self) -> bool {
        Self::PASSING.contains(self)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
