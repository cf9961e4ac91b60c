//! Streaming reader for delimited files with a fixed field count.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RegistrarError, Result};

/// Reader configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Field separator; must be an ASCII byte.
    pub delimiter: u8,
    /// Whether line 1 is a header to discard.
    pub has_header: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: false,
        }
    }
}

impl ReaderConfig {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Reject delimiters that are not ASCII, since lines are split as UTF-8 text.
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(RegistrarError::Config(format!(
                "delimiter byte 0x{:02X} is not ASCII",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Opens delimited files and yields validated records.
#[derive(Debug, Clone, Default)]
pub struct RecordReader {
    config: ReaderConfig,
}

impl RecordReader {
    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Open `path` and stream records of exactly `N` fields.
    ///
    /// The file stays open until the returned iterator is dropped.
    pub fn open<const N: usize>(&self, path: impl AsRef<Path>) -> Result<Records<File, N>> {
        self.config.validate()?;
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RegistrarError::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.records_from(file, path)
    }

    /// Stream records from any byte source. `label` names the source in errors.
    pub fn records_from<R: Read, const N: usize>(
        &self,
        reader: R,
        label: impl Into<PathBuf>,
    ) -> Result<Records<R, N>> {
        self.config.validate()?;
        Ok(Records {
            lines: BufReader::new(reader).lines(),
            path: label.into(),
            delimiter: self.config.delimiter as char,
            has_header: self.config.has_header,
            line: 0,
            done: false,
        })
    }
}

/// Lazy sequence of `N`-field records.
///
/// The first error ends the sequence; nothing after a malformed line is
/// yielded.
pub struct Records<R, const N: usize> {
    lines: Lines<BufReader<R>>,
    path: PathBuf,
    delimiter: char,
    has_header: bool,
    line: usize,
    done: bool,
}

impl<R, const N: usize> Records<R, N> {
    /// Path (or label) of the source being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based number of the most recently read line.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: Read, const N: usize> Iterator for Records<R, N> {
    type Item = Result<[String; N]>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => {
                    self.done = true;
                    return Some(Err(RegistrarError::Read {
                        path: self.path.clone(),
                        line: self.line + 1,
                        source: e,
                    }));
                }
            };
            self.line += 1;

            // The header is validated like any other line before it is dropped.
            let actual = text.split(self.delimiter).count();
            if actual != N {
                self.done = true;
                return Some(Err(RegistrarError::MalformedRecord {
                    path: self.path.clone(),
                    line: self.line,
                    actual,
                    expected: N,
                }));
            }

            if self.has_header && self.line == 1 {
                continue;
            }

            let mut fields = text.split(self.delimiter).map(str::to_string);
            return Some(Ok(std::array::from_fn(|_| {
                fields.next().unwrap_or_default()
            })));
        }
        None
    }
}

impl<R: Read, const N: usize> FusedIterator for Records<R, N> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all<const N: usize>(data: &[u8], config: ReaderConfig) -> Vec<Result<[String; N]>> {
        RecordReader::with_config(config)
            .records_from::<_, N>(data, "test.txt")
            .unwrap()
            .collect()
    }

    #[test]
    fn test_header_is_skipped() {
        let data = b"CWID\tName\tDept\n98765\tEinstein, A\tSFEN\n98764\tFeynman, R\tSFEN\n";
        let rows = read_all::<3>(data, ReaderConfig::new(b'\t').with_header(true));

        assert_eq!(rows.len(), 2);
        let first = rows[0].as_ref().unwrap();
        assert_eq!(first, &["98765", "Einstein, A", "SFEN"]);
    }

    #[test]
    fn test_header_line_is_validated() {
        let data = b"CWID|Name\n98765|Einstein, A|SFEN\n";
        let rows = read_all::<3>(data, ReaderConfig::new(b'|').with_header(true));

        assert_eq!(rows.len(), 1);
        match &rows[0] {
            Err(RegistrarError::MalformedRecord { line, actual, expected, .. }) => {
                assert_eq!(*line, 1);
                assert_eq!(*actual, 2);
                assert_eq!(*expected, 3);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_line_stops_iteration() {
        let data = b"a;b;c\nd;e\nf;g;h\n";
        let rows = read_all::<3>(data, ReaderConfig::new(b';'));

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        match &rows[1] {
            Err(RegistrarError::MalformedRecord { line, path, .. }) => {
                assert_eq!(*line, 2);
                assert_eq!(path, &PathBuf::from("test.txt"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_is_malformed() {
        let data = b"a;b;c\n\nd;e;f\n";
        let rows = read_all::<3>(data, ReaderConfig::new(b';'));

        assert_eq!(rows.len(), 2);
        match &rows[1] {
            Err(RegistrarError::MalformedRecord { line, actual, .. }) => {
                assert_eq!(*line, 2);
                assert_eq!(*actual, 1);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_newline_is_not_a_record() {
        let data = b"a;b;c\nd;e;f\n";
        let rows = read_all::<3>(data, ReaderConfig::new(b';'));

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_quotes_are_literal() {
        let data = b"10103|\"Baldwin, C\"|SFEN\n";
        let rows = read_all::<3>(data, ReaderConfig::new(b'|'));

        assert_eq!(rows[0].as_ref().unwrap()[1], "\"Baldwin, C\"");
    }

    #[test]
    fn test_crlf_terminators() {
        let data = b"10103\tSSW 567\tA\t98765\r\n10103\tSSW 564\tA-\t98764\r\n";
        let rows = read_all::<4>(data, ReaderConfig::new(b'\t'));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].as_ref().unwrap()[3], "98764");
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let data = b"a;b;c\nd;\xff;f\ng;h;i\n";
        let mut records = RecordReader::with_config(ReaderConfig::new(b';'))
            .records_from::<_, 3>(&data[..], "test.txt")
            .unwrap();

        assert_eq!(records.next().unwrap().unwrap(), ["a", "b", "c"]);
        match records.next() {
            Some(Err(RegistrarError::Read { line, path, .. })) => {
                assert_eq!(line, 2);
                assert_eq!(path, PathBuf::from("test.txt"));
            }
            other => panic!("expected Read error, got {:?}", other),
        }
        assert!(records.next().is_none());
        assert!(records.next().is_none());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let reader = RecordReader::with_config(ReaderConfig::new(0xA7));

        let err = reader
            .records_from::<_, 3>(&"a\u{a7}b\u{a7}c\n".as_bytes()[..], "test.txt")
            .err()
            .unwrap();
        assert!(matches!(err, RegistrarError::Config(_)));

        let err = reader.open::<3>("/definitely/not/here/majors.txt").err().unwrap();
        assert!(matches!(err, RegistrarError::Config(_)));
        assert!(ReaderConfig::new(b'|').validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let reader = RecordReader::with_config(ReaderConfig::new(b'\t'));
        match reader.open::<3>("/definitely/not/here/majors.txt") {
            Err(RegistrarError::SourceUnavailable { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/majors.txt"));
            }
            Err(other) => panic!("expected SourceUnavailable, got {:?}", other),
            Ok(_) => panic!("expected SourceUnavailable, got records"),
        }
    }
}
