//! Input helpers for reading delimited files.
pub mod file_reader;
