//! Delimited input files: location resolution, decoding, record splitting and
//! mapping of the header row onto a table schema.

use crate::converter::ConverterOptions;
use crate::error::RustyGridError;
use crate::table::Column;
use crate::table::Table;
use encoding_rs::Encoding;
use encoding_rs::UTF_8;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Extension every input file must carry.
const CSV_EXTENSION: &str = "csv";

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Incorrect file type '{0}': expected a .csv file")]
    InvalidExtension(String),

    #[error("Unsupported input location '{0}': only local files are supported")]
    UnsupportedLocation(String),

    #[error("Unknown input encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Empty input file '{0}'")]
    EmptyInput(String),

    #[error("Empty header in '{0}'")]
    EmptyHeader(String),

    #[error("Wrong header type '{token}' in position {position}")]
    WrongHeaderType { token: String, position: usize },
}

/// Header and data rows of a delimited file, as raw strings.
pub type Records = (Vec<String>, Vec<Vec<String>>);

/// Expands an input location into the local files it names.
///
/// `file://` URLs are turned into paths and glob patterns are expanded in
/// sorted order. A pattern that matches nothing is returned as a literal path
/// so that opening it reports the underlying I/O error.
pub fn resolve_inputs(location: &str) -> Result<Vec<PathBuf>, RustyGridError> {
    if let Ok(url) = Url::parse(location) {
        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| ReaderError::UnsupportedLocation(location.to_owned()))?;
                return Ok(vec![path]);
            }
            // Single letters are Windows drive prefixes, not URL schemes
            scheme if scheme.len() > 1 => Err(ReaderError::UnsupportedLocation(location.to_owned()))?,
            _ => (),
        }
    }

    let mut paths = glob::glob(location)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(glob::GlobError::into_error)?;
    if paths.is_empty() {
        debug!(location, "no glob match, using location as a literal path");
        paths.push(PathBuf::from(location));
    }
    paths.sort();
    Ok(paths)
}

/// Looks up an encoding by WHATWG label (`windows-1251`, `latin1`, ...) or by
/// Windows code page number (`1251`, `866`, ...).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, ReaderError> {
    let label = label.trim();
    let encoding = match label.parse::<u16>() {
        Ok(code_page) => codepage::to_encoding(code_page),
        Err(_) => Encoding::for_label(label.as_bytes()),
    };
    encoding.ok_or_else(|| ReaderError::UnknownEncoding(label.to_owned()))
}

/// Reader for a single delimited input file.
#[derive(Clone, Debug)]
pub struct FileReader {
    path: PathBuf,
    options: ConverterOptions,
}

impl FileReader {
    pub fn new(path: impl Into<PathBuf>, options: ConverterOptions) -> Self {
        FileReader { path: path.into(), options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks that the file carries the `.csv` extension.
    pub fn validate(&self) -> Result<(), ReaderError> {
        if self.path.extension() == Some(OsStr::new(CSV_EXTENSION)) {
            Ok(())
        } else {
            Err(ReaderError::InvalidExtension(self.name()))
        }
    }

    /// Reads the file and splits it into the header and the data rows.
    pub fn read(&self) -> Result<Records, RustyGridError> {
        let bytes = fs::read(&self.path)?;
        let text = self.decode(&bytes)?;
        let mut records = self.split(&text)?.into_iter();
        let header = records.next().ok_or_else(|| ReaderError::EmptyInput(self.name()))?;
        if header.is_empty() {
            Err(ReaderError::EmptyHeader(self.name()))?;
        }
        let rows: Vec<Vec<String>> = records.collect();
        debug!(file = %self.path.display(), columns = header.len(), rows = rows.len(), "read input");
        Ok((header, rows))
    }

    /// Reads the file into a table typed by its header row.
    ///
    /// Header tokens `int`, `string` and `money` select the column type and
    /// alignment; other tokens fail unless any-header mode keeps them as
    /// untyped columns. All data rows are appended in a single call.
    pub fn table(&self) -> Result<Table, RustyGridError> {
        let (header, rows) = self.read()?;
        let mut table = Table::new(header.len(), self.options.allow_empty);
        for (position, token) in header.iter().enumerate() {
            let column = Column::from_header(token, self.options.any_header).ok_or_else(|| {
                ReaderError::WrongHeaderType {
                    token: token.to_owned(),
                    position,
                }
            })?;
            table.set_column(position, column.kind, column.alignment)?;
        }
        table.append(&rows)?;
        Ok(table)
    }

    /// Decodes raw bytes with the configured encoding, honouring a byte order mark.
    fn decode(&self, bytes: &[u8]) -> Result<String, ReaderError> {
        let encoding = match &self.options.encoding {
            Some(label) => resolve_encoding(label)?,
            None => UTF_8,
        };
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            debug!(file = %self.path.display(), encoding = used.name(), "replaced malformed input sequences");
        }
        Ok(text.into_owned())
    }

    /// Splits decoded text into records. Record lengths are not checked here;
    /// the table reports rows whose arity differs from the header.
    fn split(&self, text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.options.delimiter)
            .flexible(true)
            .from_reader(text.as_bytes())
            .records()
            .map(|record| record.map(|record| record.iter().map(str::to_owned).collect()))
            .collect()
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
