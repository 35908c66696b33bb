pub mod auth;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod spreadsheet_roster_sheet;
pub mod spreadsheet_write;
pub mod string_rows;
pub mod value_range_factory;
