use tracing::instrument;

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    string_rows::IntoStringRows,
};

pub trait SpreadsheetRead {
    fn read_rows(
        &self,
        range: &str,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    /// A range with no values comes back as no rows rather than an error.
    #[instrument]
    async fn read_rows(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let value_range = self.get_range(range).await?;

        Ok(value_range
            .values
            .map(IntoStringRows::into_string_rows)
            .unwrap_or_default())
    }
}
