//! Grid geometry: column widths, row heights and cell padding.

use crate::table::column::Alignment;
use crate::table::column::Column;

/// Separator that breaks wrapped cells into display lines.
const WORD_SEPARATOR: char = ' ';

/// Computed column widths and row heights of a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Layout {
    /// Widest display line per column, in code points
    pub(crate) widths: Vec<usize>,
    /// Display line count per row, at least 1
    pub(crate) heights: Vec<usize>,
}

impl Layout {
    /// Measures every display line of every stored row.
    pub(crate) fn compute(columns: &[Column], rows: &[Vec<String>]) -> Self {
        let mut widths = vec![0; columns.len()];
        let mut heights = Vec::with_capacity(rows.len());
        for row in rows {
            let mut height = 1;
            for ((column, cell), width) in columns.iter().zip(row).zip(widths.iter_mut()) {
                let mut lines = 0;
                for line in display_lines(column, cell) {
                    *width = (*width).max(display_width(line));
                    lines += 1;
                }
                height = height.max(lines);
            }
            heights.push(height);
        }
        Layout { widths, heights }
    }

    /// Builds the horizontal rule drawn above the first row and below every row.
    pub(crate) fn rule(&self) -> String {
        let mut rule = String::with_capacity(self.widths.iter().sum::<usize>() + self.widths.len() + 2);
        rule.push('+');
        for width in &self.widths {
            rule.extend(std::iter::repeat('-').take(*width));
            rule.push('+');
        }
        rule.push('\n');
        rule
    }
}

/// Splits a stored cell into the lines it occupies on screen.
/// Wrapped columns yield one line per space-separated token, others a single line.
pub(crate) fn display_lines<'a>(column: &Column, cell: &'a str) -> impl Iterator<Item = &'a str> {
    let (words, whole) = if column.kind.is_wrapped() {
        (Some(cell.split(WORD_SEPARATOR)), None)
    } else {
        (None, Some(cell))
    };
    words.into_iter().flatten().chain(whole)
}

/// Returns the `index`-th display line of a cell, or an empty line past its end.
pub(crate) fn display_line<'a>(column: &Column, cell: &'a str, index: usize) -> &'a str {
    display_lines(column, cell).nth(index).unwrap_or("")
}

/// Width of a display line in code points.
#[inline]
pub(crate) fn display_width(line: &str) -> usize {
    line.chars().count()
}

/// Pads `content` with spaces to `width` code points according to `alignment`.
/// Center alignment puts the odd space on the right.
pub(crate) fn push_aligned(out: &mut String, content: &str, alignment: Alignment, width: usize) {
    let padding = width.saturating_sub(display_width(content));
    let (left, right) = match alignment {
        Alignment::Left => (0, padding),
        Alignment::Right => (padding, 0),
        Alignment::Center => (padding / 2, padding - padding / 2),
    };
    out.extend(std::iter::repeat(' ').take(left));
    out.push_str(content);
    out.extend(std::iter::repeat(' ').take(right));
}
