use std::sync::Arc;

use error_stack::ResultExt;

use crate::domain::sheets::column_range::ColumnRange;
use crate::ports::roster_sheet::{ColumnWriteAck, RosterSheet, RosterSheetError};

use super::{
    spreadsheet_manager::SpreadsheetManager, spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};

pub struct SpreadsheetRosterSheet {
    pub spreadsheet_manager: Arc<SpreadsheetManager>,
}

impl SpreadsheetRosterSheet {
    pub fn new(spreadsheet_manager: Arc<SpreadsheetManager>) -> Self {
        Self {
            spreadsheet_manager,
        }
    }
}

#[async_trait::async_trait]
impl RosterSheet for SpreadsheetRosterSheet {
    async fn read_rows(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, RosterSheetError> {
        self.spreadsheet_manager
            .read_rows(range)
            .await
            .change_context(RosterSheetError::FailedToReadRows)
    }

    async fn write_column(
        &self,
        range: &ColumnRange,
        values: &[String],
    ) -> error_stack::Result<ColumnWriteAck, RosterSheetError> {
        let response = self
            .spreadsheet_manager
            .write_column(range, values)
            .await
            .change_context(RosterSheetError::FailedToWriteColumn)?;

        Ok(ColumnWriteAck {
            updated_range: response.updated_range,
            updated_rows: response.updated_rows,
            updated_cells: response.updated_cells,
        })
    }
}
