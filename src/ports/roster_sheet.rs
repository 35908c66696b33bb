use thiserror::Error;

use crate::domain::sheets::column_range::ColumnRange;

#[derive(Error, Debug)]
pub enum RosterSheetError {
    #[error("Failed to read roster rows")]
    FailedToReadRows,
    #[error("Failed to write column")]
    FailedToWriteColumn,
}

/// What the spreadsheet reported back after a column write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnWriteAck {
    pub updated_range: Option<String>,
    pub updated_rows: Option<i32>,
    pub updated_cells: Option<i32>,
}

impl std::fmt::Display for ColumnWriteAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "updatedRange: {}, updatedRows: {}, updatedCells: {}",
            self.updated_range.as_deref().unwrap_or("-"),
            self.updated_rows.unwrap_or(0),
            self.updated_cells.unwrap_or(0)
        )
    }
}

#[async_trait::async_trait]
pub trait RosterSheet: Send + Sync {
    /// Fetches every row of `range` as text cells. An empty range yields no rows.
    async fn read_rows(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, RosterSheetError>;

    /// Writes one value per row into `range`, interpreted as if typed by a user.
    async fn write_column(
        &self,
        range: &ColumnRange,
        values: &[String],
    ) -> error_stack::Result<ColumnWriteAck, RosterSheetError>;
}
