//! Per-file source configuration for repository loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistrarError, Result};
use crate::input::ReaderConfig;

/// Where one input file lives inside the base directory and how it is split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// File name relative to the base directory.
    pub file_name: String,
    /// Field separator; must be a single ASCII character.
    pub delimiter: char,
    /// Whether line 1 is a header.
    #[serde(default = "default_has_header")]
    pub has_header: bool,
}

fn default_has_header() -> bool {
    true
}

impl SourceConfig {
    pub fn new(file_name: impl Into<String>, delimiter: char) -> Self {
        Self {
            file_name: file_name.into(),
            delimiter,
            has_header: true,
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Reader settings for this source.
    pub fn reader_config(&self) -> Result<ReaderConfig> {
        if !self.delimiter.is_ascii() {
            return Err(RegistrarError::Config(format!(
                "delimiter {:?} for '{}' is not a single ASCII character",
                self.delimiter, self.file_name
            )));
        }
        Ok(ReaderConfig::new(self.delimiter as u8).with_header(self.has_header))
    }
}

/// Layout of the four registrar files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Majors file; `None` loads students without requirement sets.
    pub majors: Option<SourceConfig>,
    pub students: SourceConfig,
    pub instructors: SourceConfig,
    pub grades: SourceConfig,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            majors: Some(SourceConfig::new("majors.txt", '\t')),
            students: SourceConfig::new("students.txt", ';'),
            instructors: SourceConfig::new("instructors.txt", '|'),
            grades: SourceConfig::new("grades.txt", '|'),
        }
    }
}

impl RepositoryConfig {
    /// Every file tab-separated with a header.
    pub fn tab_separated() -> Self {
        Self {
            majors: Some(SourceConfig::new("majors.txt", '\t')),
            students: SourceConfig::new("students.txt", '\t'),
            instructors: SourceConfig::new("instructors.txt", '\t'),
            grades: SourceConfig::new("grades.txt", '\t'),
        }
    }

    /// Load configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| RegistrarError::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn without_majors(mut self) -> Self {
        self.majors = None;
        self
    }

    /// Set header presence on every file.
    pub fn with_header(mut self, has_header: bool) -> Self {
        if let Some(majors) = self.majors.as_mut() {
            majors.has_header = has_header;
        }
        self.students.has_header = has_header;
        self.instructors.has_header = has_header;
        self.grades.has_header = has_header;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_separators() {
        let config = RepositoryConfig::default();
        let majors = config.majors.as_ref().unwrap();

        assert_eq!(majors.delimiter, '\t');
        assert_eq!(config.students.delimiter, ';');
        assert_eq!(config.instructors.delimiter, '|');
        assert_eq!(config.grades.delimiter, '|');
        assert!(config.grades.has_header);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "grades": { "file_name": "grades.tsv", "delimiter": "\t" } }"#;
        let config: RepositoryConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.grades.file_name, "grades.tsv");
        assert_eq!(config.grades.delimiter, '\t');
        assert!(config.grades.has_header);
        assert_eq!(config.students, RepositoryConfig::default().students);
    }

    #[test]
    fn test_null_majors_disables_phase() {
        let config: RepositoryConfig = serde_json::from_str(r#"{ "majors": null }"#).unwrap();
        assert!(config.majors.is_none());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let source = SourceConfig::new("students.txt", '§');
        assert!(matches!(source.reader_config(), Err(RegistrarError::Config(_))));
    }

    #[test]
    fn test_with_header_applies_everywhere() {
        let config = RepositoryConfig::tab_separated().with_header(false);

        assert!(!config.majors.unwrap().has_header);
        assert!(!config.students.has_header);
        assert!(!config.instructors.has_header);
        assert!(!config.grades.has_header);
    }
}
