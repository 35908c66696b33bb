use error_stack::ResultExt;
use google_sheets4::{
    api::{UpdateValuesResponse, ValueRange},
    Sheets,
};
use std::fmt::Debug;
use thiserror::Error;
use tracing::instrument;

use crate::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    auth::SheetsAuthenticator,
    http_client::{HttpClient, HttpsConnector},
};

/// Values typed into a cell by hand: numbers stay numbers, text stays text.
pub const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new", skip(client, authenticator))]
    pub fn new(
        config: SpreadsheetConfig,
        client: HttpClient,
        authenticator: SheetsAuthenticator,
    ) -> Self {
        let hub = Sheets::new(client, authenticator);
        SpreadsheetManager { config, hub }
    }

    #[instrument]
    pub(super) async fn get_range(
        &self,
        range: &str,
    ) -> error_stack::Result<ValueRange, SpreadsheetManagerError> {
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch range {}", range))?;

        Ok(value_range)
    }

    #[instrument(skip(value_range))]
    pub(super) async fn write_range(
        &self,
        range_str: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(value_range, &self.config.spreadsheet_id, range_str.as_ref())
            .value_input_option(VALUE_INPUT_OPTION)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range_str))?;

        Ok(response)
    }
}
