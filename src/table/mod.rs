//! # Table Engine
//!
//! Typed, column-aligned rows rendered as a bordered monospace grid:
//!
//! ```text
//! +--+------+---------+
//! |1 |aaaaaa| 1 000,33|
//! |  |bbb   |         |
//! +--+------+---------+
//! ```
//!
//! Rows are validated against the column schema when they are appended, so
//! rendering only ever sees well-formed cells and cannot fail on table state.
use crate::table::layout::display_line;
use crate::table::layout::push_aligned;
use crate::table::layout::Layout;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::sync::OnceLock;
use thiserror::Error;

pub mod column;
pub mod currency;
pub(crate) mod layout;

pub use column::Alignment;
pub use column::Column;
pub use column::ColumnType;

/// Fractional digits kept for currency cells.
const CURRENCY_PRECISION: usize = 2;

/// Errors raised while configuring a table or appending rows to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Column index is not below the table's column count
    #[error("Column index {index} out of range for a table with {columns} columns")]
    IndexOutOfRange { index: usize, columns: usize },

    /// Row does not have one cell per column
    #[error("Inconsistent number of columns for row {row}: expected {expected} but got {actual}")]
    ColumnCountMismatch { row: usize, expected: usize, actual: usize },

    /// Cell value cannot be read as the column's type
    #[error("Row {row}, column {column}: expected type '{expected}' but got '{value}'")]
    TypeMismatch {
        row: usize,
        column: usize,
        expected: ColumnType,
        value: String,
    },
}

/// A fixed-width text table.
///
/// The column count is fixed at creation. Each column carries a [`ColumnType`]
/// that governs how appended cells are validated and how they wrap, and an
/// [`Alignment`] used when the grid is rendered.
#[derive(Debug, Default)]
pub struct Table {
    /// Store empty cells as is instead of type checking them
    allow_empty: bool,
    /// Column schema, one entry per column
    columns: Vec<Column>,
    /// Validated rows in render order
    rows: Vec<Vec<String>>,
    /// Layout of the current rows, dropped on every mutation
    layout: OnceLock<Layout>,
}

impl Table {
    /// Creates an empty table with `columns` untyped, left-aligned columns.
    pub fn new(columns: usize, allow_empty: bool) -> Self {
        Table {
            allow_empty,
            columns: vec![Column::default(); columns],
            rows: Vec::new(),
            layout: OnceLock::new(),
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether empty cells bypass type validation.
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Schema of the column at `index`.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Stored rows, in render order, after validation and transformation.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Sets the type and alignment of a column. Column indices are 0-based.
    ///
    /// Rows appended earlier are kept as they were stored; the new type only
    /// applies to later appends.
    pub fn set_column(&mut self, index: usize, kind: ColumnType, alignment: Alignment) -> Result<(), TableError> {
        let columns = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or(TableError::IndexOutOfRange { index, columns })?;
        *column = Column::new(kind, alignment);
        self.layout.take();
        Ok(())
    }

    /// Validates and appends one or more rows.
    ///
    /// Either every row of the call is appended or none is: on error the table
    /// is left as it was before the call. Reported row positions are 0-based
    /// within `rows`.
    pub fn append<R, C>(&mut self, rows: R) -> Result<(), TableError>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut accepted = Vec::new();
        for (row_index, row) in rows.into_iter().enumerate() {
            let row: Vec<C> = row.into_iter().collect();
            if row.len() != self.columns.len() {
                Err(TableError::ColumnCountMismatch {
                    row: row_index,
                    expected: self.columns.len(),
                    actual: row.len(),
                })?;
            }
            let record = row
                .iter()
                .zip(&self.columns)
                .enumerate()
                .map(|(col_index, (value, column))| {
                    let value: &str = value.as_ref();
                    self.transform(column, value).ok_or_else(|| TableError::TypeMismatch {
                        row: row_index,
                        column: col_index,
                        expected: column.kind,
                        value: value.to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            accepted.push(record);
        }
        if !accepted.is_empty() {
            self.rows.append(&mut accepted);
            self.layout.take();
        }
        Ok(())
    }

    /// Renders the table into `sink`.
    ///
    /// Rendering does not change the table; identical tables always produce
    /// identical output. Only errors raised by the sink itself are returned.
    pub fn write<W: Write>(&self, sink: &mut W) -> std::io::Result<()> {
        sink.write_all(self.render().as_bytes())
    }

    /// Renders the table into a string.
    pub fn render(&self) -> String {
        let layout = self.layout();
        let rule = layout.rule();
        let mut out = String::with_capacity(rule.len() * (layout.heights.iter().sum::<usize>() + self.rows.len() + 1));
        out.push_str(&rule);
        for (row, height) in self.rows.iter().zip(&layout.heights) {
            for line in 0..*height {
                out.push('|');
                for ((column, cell), width) in self.columns.iter().zip(row).zip(&layout.widths) {
                    push_aligned(&mut out, display_line(column, cell, line), column.alignment, *width);
                    out.push('|');
                }
                out.push('\n');
            }
            out.push_str(&rule);
        }
        out
    }

    /// Layout of the current rows, computed on first use.
    fn layout(&self) -> &Layout {
        self.layout.get_or_init(|| Layout::compute(&self.columns, &self.rows))
    }

    /// Checks a raw cell against its column type and returns the value to store.
    fn transform(&self, column: &Column, value: &str) -> Option<String> {
        if self.allow_empty && value.is_empty() {
            return Some(String::new());
        }
        match column.kind {
            ColumnType::Integer => value.parse::<i64>().ok().map(|_| value.to_owned()),
            ColumnType::Currency => value
                .parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite())
                .map(|amount| currency::format(amount, CURRENCY_PRECISION)),
            ColumnType::Text | ColumnType::Unspecified => Some(value.to_owned()),
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCHEMA: [ColumnType; 4] = [ColumnType::Integer, ColumnType::Text, ColumnType::Currency, ColumnType::Text];

    fn table(allow_empty: bool, alignments: [Alignment; 4], rows: &[[&str; 4]]) -> Table {
        let mut table = Table::new(SCHEMA.len(), allow_empty);
        for (index, (kind, alignment)) in SCHEMA.into_iter().zip(alignments).enumerate() {
            table.set_column(index, kind, alignment).unwrap();
        }
        table.append(rows).unwrap();
        table
    }

    #[test]
    fn new_table_has_default_schema() {
        let table = Table::new(3, false);
        assert_eq!(table.column_count(), 3);
        assert!(!table.allow_empty());
        for index in 0..3 {
            assert_eq!(table.column(index), Some(&Column::new(ColumnType::Unspecified, Alignment::Left)));
        }
        assert_eq!(table.column(3), None);
        assert!(table.rows().is_empty());
    }

    #[test]
    fn set_column_checks_index() {
        let mut table = Table::new(3, true);
        assert_eq!(
            table.set_column(3, ColumnType::Text, Alignment::Center),
            Err(TableError::IndexOutOfRange { index: 3, columns: 3 })
        );
        assert_eq!(
            table.set_column(usize::MAX, ColumnType::Text, Alignment::Center),
            Err(TableError::IndexOutOfRange { index: usize::MAX, columns: 3 })
        );
        assert!(table.set_column(2, ColumnType::Text, Alignment::Center).is_ok());
        assert_eq!(table.column(2), Some(&Column::new(ColumnType::Text, Alignment::Center)));
        assert!(table.set_column(2, ColumnType::Integer, Alignment::Right).is_ok());
        assert_eq!(table.column(2), Some(&Column::new(ColumnType::Integer, Alignment::Right)));
    }

    #[test]
    fn set_column_on_empty_table_fails() {
        let mut table = Table::new(0, false);
        assert!(matches!(
            table.set_column(0, ColumnType::Text, Alignment::Left),
            Err(TableError::IndexOutOfRange { index: 0, columns: 0 })
        ));
    }

    #[test]
    fn append_checks_column_count() {
        let mut table = Table::new(3, true);
        table.append([["1", "2", "3"]]).unwrap();

        let error = table.append([vec![""]]).unwrap_err();
        assert_eq!(error, TableError::ColumnCountMismatch { row: 0, expected: 3, actual: 1 });

        let error = table.append([vec!["a", "b", "c"], vec!["", "", "", ""]]).unwrap_err();
        assert_eq!(error, TableError::ColumnCountMismatch { row: 1, expected: 3, actual: 4 });

        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn append_rejects_empty_integers_when_not_allowed() {
        let mut table = Table::new(3, false);
        for index in 0..3 {
            table.set_column(index, ColumnType::Integer, Alignment::Left).unwrap();
        }
        let error = table.append([["", "", ""]]).unwrap_err();
        assert_eq!(
            error,
            TableError::TypeMismatch { row: 0, column: 0, expected: ColumnType::Integer, value: String::new() }
        );
        assert!(table.rows().is_empty());
    }

    #[test]
    fn append_validates_integers() {
        let mut table = Table::new(1, false);
        table.set_column(0, ColumnType::Integer, Alignment::Right).unwrap();
        for value in ["0", "-5", "42", "+7"] {
            assert!(table.append([[value]]).is_ok(), "{value} should be accepted");
        }
        for value in ["1.5", "4e2", "abc", "12a", " 1", "-", "1 000"] {
            assert!(
                matches!(table.append([[value]]), Err(TableError::TypeMismatch { .. })),
                "{value} should be rejected"
            );
        }
        assert_eq!(table.rows(), &[vec!["0"], vec!["-5"], vec!["42"], vec!["+7"]]);
    }

    #[test]
    fn append_formats_currency() {
        let mut table = Table::new(1, false);
        table.set_column(0, ColumnType::Currency, Alignment::Right).unwrap();
        table.append([["1000.33"], ["0.01"], ["10000"], ["-2500.5"]]).unwrap();
        assert_eq!(table.rows(), &[vec!["1 000,33"], vec!["0,01"], vec!["10 000,00"], vec!["-2 500,50"]]);

        for value in ["", "12,5", "ten", "inf", "NaN"] {
            assert!(
                matches!(table.append([[value]]), Err(TableError::TypeMismatch { .. })),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn append_allows_empty_cells_for_every_type() {
        let mut table = Table::new(4, true);
        for (index, kind) in SCHEMA.into_iter().enumerate() {
            table.set_column(index, kind, Alignment::Left).unwrap();
        }
        table.append([["", "", "", ""]]).unwrap();
        assert_eq!(table.rows(), &[vec!["", "", "", ""]]);
    }

    #[test]
    fn append_is_atomic_per_call() {
        let mut table = Table::new(2, false);
        table.set_column(0, ColumnType::Integer, Alignment::Left).unwrap();
        table.append([["1", "first"]]).unwrap();

        let error = table.append([["2", "second"], ["3", "third"], ["x", "fourth"]]).unwrap_err();
        assert_eq!(
            error,
            TableError::TypeMismatch { row: 2, column: 0, expected: ColumnType::Integer, value: "x".to_string() }
        );
        assert_eq!(table.rows(), &[vec!["1", "first"]]);
    }

    #[test]
    fn append_copies_input() {
        let mut table = Table::new(2, false);
        let mut buffer = vec!["a".to_string(), "b".to_string()];
        table.append([&buffer]).unwrap();
        buffer[0].push_str("changed");
        buffer[1] = "c".to_string();
        assert_eq!(table.rows(), &[vec!["a", "b"]]);
    }

    #[test]
    fn set_column_is_not_retroactive() {
        let mut table = Table::new(1, false);
        table.append([["abc"]]).unwrap();
        table.set_column(0, ColumnType::Integer, Alignment::Right).unwrap();
        assert_eq!(table.rows(), &[vec!["abc"]]);
        assert!(table.append([["abc"]]).is_err());
        assert_eq!(table.render(), "+---+\n|abc|\n+---+\n");
    }

    #[test]
    fn render_three_column_scenario() {
        let mut table = Table::new(3, false);
        table.set_column(0, ColumnType::Integer, Alignment::Left).unwrap();
        table.set_column(1, ColumnType::Text, Alignment::Left).unwrap();
        table.set_column(2, ColumnType::Currency, Alignment::Right).unwrap();
        table
            .append([
                ["1", "aaaaaa bbb ccc", "1000.33"],
                ["7", "aaaaaa bbb", "0.01"],
                ["11", "aaaaaa", "10000"],
            ])
            .unwrap();

        let mut buffer = Vec::new();
        table.write(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "\
+--+------+---------+
|1 |aaaaaa| 1 000,33|
|  |bbb   |         |
|  |ccc   |         |
+--+------+---------+
|7 |aaaaaa|     0,01|
|  |bbb   |         |
+--+------+---------+
|11|aaaaaa|10 000,00|
+--+------+---------+
"
        );
    }

    #[test]
    fn render_left_aligned_text() {
        let table = table(
            false,
            [Alignment::Left, Alignment::Left, Alignment::Right, Alignment::Left],
            &[
                ["1", "aaaaaa bbb ccc", "1000.33", "aaaaaa bbb ccc tttttttt"],
                ["7", "aaaaaa bbb", "0.01", "aaaaaa ccc tttttttt"],
                ["11", "aaaaaa", "10000", "tttttttt"],
            ],
        );
        assert_eq!(
            table.render(),
            "\
+--+------+---------+--------+
|1 |aaaaaa| 1 000,33|aaaaaa  |
|  |bbb   |         |bbb     |
|  |ccc   |         |ccc     |
|  |      |         |tttttttt|
+--+------+---------+--------+
|7 |aaaaaa|     0,01|aaaaaa  |
|  |bbb   |         |ccc     |
|  |      |         |tttttttt|
+--+------+---------+--------+
|11|aaaaaa|10 000,00|tttttttt|
+--+------+---------+--------+
"
        );
    }

    #[test]
    fn render_centered_text() {
        let table = table(
            false,
            [Alignment::Left, Alignment::Center, Alignment::Right, Alignment::Center],
            &[
                ["1", "aaaaaa bbb ccc", "1000.33", "aaaaaa bbb"],
                ["7", "aaaaaa bbb", "0.01", "aaaaaa ccc"],
                ["11", "aaaaaa", "10000", "tttttttt"],
            ],
        );
        assert_eq!(
            table.render(),
            "\
+--+------+---------+--------+
|1 |aaaaaa| 1 000,33| aaaaaa |
|  | bbb  |         |  bbb   |
|  | ccc  |         |        |
+--+------+---------+--------+
|7 |aaaaaa|     0,01| aaaaaa |
|  | bbb  |         |  ccc   |
+--+------+---------+--------+
|11|aaaaaa|10 000,00|tttttttt|
+--+------+---------+--------+
"
        );
    }

    #[test]
    fn render_with_empty_cells() {
        let table = table(
            true,
            [Alignment::Left, Alignment::Left, Alignment::Right, Alignment::Left],
            &[
                ["1", "aaaaaa bbb ccc", "1000.33", "aaaaaa bbb ccc"],
                ["7", "aaaaaa bbb", "", ""],
                ["", "aaaaaa", "10000", "tttttttt"],
            ],
        );
        assert_eq!(
            table.render(),
            "\
+-+------+---------+--------+
|1|aaaaaa| 1 000,33|aaaaaa  |
| |bbb   |         |bbb     |
| |ccc   |         |ccc     |
+-+------+---------+--------+
|7|aaaaaa|         |        |
| |bbb   |         |        |
+-+------+---------+--------+
| |aaaaaa|10 000,00|tttttttt|
+-+------+---------+--------+
"
        );
    }

    #[test]
    fn render_counts_code_points() {
        let mut table = Table::new(2, false);
        table.set_column(1, ColumnType::Text, Alignment::Right).unwrap();
        table.append([["привет", "é a"], ["ok", "日本語"]]).unwrap();
        assert_eq!(
            table.render(),
            "\
+------+---+
|привет|  é|
|      |  a|
+------+---+
|ok    |日本語|
+------+---+
"
        );
    }

    #[test]
    fn render_center_with_odd_padding() {
        let mut table = Table::new(1, false);
        table.set_column(0, ColumnType::Unspecified, Alignment::Center).unwrap();
        table.append([["abcdefg"], ["abcd"]]).unwrap();
        assert_eq!(table.render(), "+-------+\n|abcdefg|\n+-------+\n| abcd  |\n+-------+\n");
    }

    #[test]
    fn render_empty_tables() {
        assert_eq!(Table::new(0, false).render(), "+\n");
        assert_eq!(Table::new(2, false).render(), "+++\n");

        let mut table = Table::new(0, false);
        table.append([Vec::<String>::new()]).unwrap();
        assert_eq!(table.render(), "+\n|\n+\n");
    }

    #[test]
    fn render_is_repeatable() {
        let table = table(
            false,
            [Alignment::Right; 4],
            &[["1", "a b", "1.5", "c"], ["22", "dd", "3", "e f g"]],
        );
        let mut first = Vec::new();
        let mut second = Vec::new();
        table.write(&mut first).unwrap();
        table.write(&mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(table.to_string(), String::from_utf8(first).unwrap());
    }

    #[test]
    fn render_reflects_later_appends() {
        let mut table = Table::new(1, false);
        table.append([["a"]]).unwrap();
        assert_eq!(table.render(), "+-+\n|a|\n+-+\n");
        table.append([["bbb"]]).unwrap();
        assert_eq!(table.render(), "+---+\n|a  |\n+---+\n|bbb|\n+---+\n");
        table.set_column(0, ColumnType::Unspecified, Alignment::Right).unwrap();
        assert_eq!(table.render(), "+---+\n|  a|\n+---+\n|bbb|\n+---+\n");
    }

    #[test]
    fn error_messages_carry_context() {
        let error = TableError::TypeMismatch {
            row: 1,
            column: 2,
            expected: ColumnType::Currency,
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Row 1, column 2: expected type 'money' but got 'abc'");
    }
}
