//! Entity records built from the registrar files.

mod grade;
mod instructor;
mod major;
mod student;

pub use grade::{CourseFlag, LetterGrade};
pub use instructor::Instructor;
pub use major::Major;
pub use student::{RemainingElectives, Student};
