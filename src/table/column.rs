use std::fmt::Display;
use std::fmt::Formatter;

/// Supported column data types for table cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnType {
    /// Base-10 signed integers, stored as written
    Integer,
    /// Free text, rendered one space-separated word per line
    Text,
    /// Decimal amounts, stored in formatted currency form
    Currency,
    /// Anything else, stored and rendered as is
    #[default]
    Unspecified,
}

/// Horizontal placement of cell content inside its column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Schema entry of a single table column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Column {
    /// Column data type
    pub kind: ColumnType,
    /// Content alignment
    pub alignment: Alignment,
}

impl ColumnType {
    /// Returns the header token naming this column type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Text => "string",
            Self::Currency => "money",
            Self::Unspecified => "unspecified",
        }
    }

    /// Parses a header token into a column type.
    /// Only the exact tokens `int`, `string` and `money` are recognized.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "int" => Some(Self::Integer),
            "string" => Some(Self::Text),
            "money" => Some(Self::Currency),
            _ => None,
        }
    }

    /// Returns the alignment a column of this type gets when built from a header.
    pub const fn default_alignment(&self) -> Alignment {
        match self {
            Self::Integer | Self::Currency => Alignment::Right,
            Self::Text | Self::Unspecified => Alignment::Left,
        }
    }

    /// Returns true if cells of this type wrap onto one line per word.
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        matches!(self, ColumnType::Text)
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Column {
    pub const fn new(kind: ColumnType, alignment: Alignment) -> Self {
        Column { kind, alignment }
    }

    /// Builds the column described by a header token, keeping unknown tokens
    /// as `Unspecified` when `any_header` is set.
    pub fn from_header(token: &str, any_header: bool) -> Option<Self> {
        match ColumnType::parse(token) {
            Some(kind) => Some(Column::new(kind, kind.default_alignment())),
            None if any_header => Some(Column::default()),
            None => None,
        }
    }
}
