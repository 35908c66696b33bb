pub mod roster_sheet;
pub mod routine;
