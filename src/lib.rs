//! # Rusty Grid
//!
//! Renders typed, delimited data as a fixed-width text table.
//!
//! ## Features
//!
//! - **Typed columns**: integer, text, currency and untyped columns, validated
//!   when rows are appended
//! - **Currency formatting**: space-grouped thousands with a comma decimal
//!   separator (`10000` becomes `10 000,00`)
//! - **Word wrapping**: text cells render one space-separated word per line
//! - **Alignment**: left, center and right aligned columns
//! - **CSV input**: `;`-delimited files with an `int`/`string`/`money` header row,
//!   optional legacy encodings, glob patterns and `file://` URLs
//!
//! ## Example
//!
//! ```
//! use rusty_grid::table::{Alignment, ColumnType, Table};
//!
//! let mut table = Table::new(2, false);
//! table.set_column(0, ColumnType::Text, Alignment::Left).unwrap();
//! table.set_column(1, ColumnType::Currency, Alignment::Right).unwrap();
//! table.append([["coffee beans", "1250.5"]]).unwrap();
//!
//! assert_eq!(
//!     table.render(),
//!     "+------+--------+\n|coffee|1 250,50|\n|beans |        |\n+------+--------+\n"
//! );
//! ```
pub mod converter;
pub mod error;
pub mod helpers;
pub mod table;

pub use converter::Converter;
pub use converter::ConverterOptions;
pub use error::RustyGridError;
pub use table::Table;
