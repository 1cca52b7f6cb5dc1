//! Conversion of delimited input files into rendered text tables.

use crate::error::ResultMessage;
use crate::error::RustyGridError;
use crate::helpers::file_reader::resolve_inputs;
use crate::helpers::file_reader::FileReader;
use std::io::Write;
use tracing::debug;

/// Record separator of the input files unless configured otherwise.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Settings shared by every input of a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Store empty cells as is instead of type checking them
    pub allow_empty: bool,
    /// Keep header tokens other than `int`, `string` and `money` as untyped columns
    pub any_header: bool,
    /// Field delimiter byte
    pub delimiter: u8,
    /// Input encoding label or Windows code page, UTF-8 when unset
    pub encoding: Option<String>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            allow_empty: false,
            any_header: false,
            delimiter: DEFAULT_DELIMITER,
            encoding: None,
        }
    }
}

/// Renders every file named by an input location as a table.
#[derive(Clone, Debug)]
pub struct Converter {
    location: String,
    options: ConverterOptions,
}

impl Converter {
    pub fn new(location: impl Into<String>, options: ConverterOptions) -> Self {
        Converter {
            location: location.into(),
            options,
        }
    }

    /// Runs the conversion, writing one grid per input file to `sink` with a
    /// blank line between grids. Stops at the first failing file.
    ///
    /// Returns the number of rendered tables.
    pub fn run<W: Write>(&self, sink: &mut W) -> Result<usize, RustyGridError> {
        let inputs = resolve_inputs(&self.location).with_prefix(&self.location)?;
        debug!(location = %self.location, files = inputs.len(), "resolved inputs");
        let mut rendered = 0;
        for path in inputs {
            let reader = FileReader::new(path, self.options.clone());
            let name = reader.path().display().to_string();
            let table = reader
                .validate()
                .map_err(RustyGridError::from)
                .and_then(|_| reader.table())
                .with_prefix(&name)?;
            if rendered > 0 {
                sink.write_all(b"\n")?;
            }
            table.write(sink)?;
            rendered += 1;
            debug!(file = %name, rows = table.rows().len(), "rendered table");
        }
        Ok(rendered)
    }
}
