//! Delimited record input.

mod reader;

pub use reader::{ReaderConfig, RecordReader, Records};
