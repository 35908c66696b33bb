#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    /// Range holding the header rows and the student rows, usually just the sheet title.
    pub roster_range: Box<str>,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: "1NNPU9egmEDJnytlAscxKQsUt4Q0kq4YtoNWIvkWF8rQ".into(),
            roster_range: "engenharia_de_software".into(),
        }
    }
}
