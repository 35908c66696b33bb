use super::{
    a1_notation::{with_sheet_prefix, A1Notation, ToA1Notation},
    column::Column,
    row::Row,
};

/// A single-column block of cells, `G4:G10` style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRange {
    pub column: Column,
    pub start: Row,
    pub end: Row,
    pub sheet_title: Option<String>,
}

impl ColumnRange {
    /// Range of `row_count` cells in `column`, starting at `start`.
    ///
    /// An empty block still spans its first row; callers skip empty writes.
    pub fn from_start(column: Column, start: Row, row_count: usize) -> Self {
        let extra = u32::try_from(row_count.saturating_sub(1)).unwrap_or(u32::MAX);
        Self {
            column,
            start,
            end: start + extra,
            sheet_title: None,
        }
    }

    pub fn with_sheet_title(self, sheet_title: impl Into<String>) -> Self {
        Self {
            sheet_title: Some(sheet_title.into()),
            ..self
        }
    }
}

impl ToA1Notation for ColumnRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let local = format!(
            "{col}{start}:{col}{end}",
            col = self.column,
            start = self.start,
            end = self.end
        );
        with_sheet_prefix(local, sheet_name)
    }
}

impl std::fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_a1_notation(self.sheet_title.as_deref()))
    }
}
