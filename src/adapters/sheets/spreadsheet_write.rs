use google_sheets4::api::{UpdateValuesResponse, ValueRange};
use tracing::instrument;

use crate::domain::sheets::{a1_notation::ToA1Notation, column_range::ColumnRange};

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    value_range_factory::ValueRangeFactory,
};

pub trait SpreadsheetWrite {
    fn write_column(
        &self,
        range: &ColumnRange,
        values: &[String],
    ) -> impl std::future::Future<
        Output = error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument]
    async fn write_column(
        &self,
        range: &ColumnRange,
        values: &[String],
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError> {
        let value_range = ValueRange::from_single_column(values);
        self.write_range(
            &range.to_a1_notation(range.sheet_title.as_deref()),
            value_range,
        )
        .await
    }
}
