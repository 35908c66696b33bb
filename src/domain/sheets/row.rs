use std::fmt::Formatter;

/// A spreadsheet row. Stored zero-based, displayed 1-based.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: usize) -> Self {
        Row {
            index: u32::try_from(index).unwrap_or(u32::MAX - 1),
        }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Row number as shown in the spreadsheet UI and used in A1 notation.
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }
}

impl std::ops::Add<u32> for Row {
    type Output = Row;

    fn add(self, rhs: u32) -> Self::Output {
        Row {
            index: self.index.saturating_add(rhs),
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.row())
    }
}
