// Public API exports
pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod prettyprint;

// Re-export key types for easy access
pub use application::grading::grading_routine::{GradingReport, GradingRoutine};
pub use domain::grading::{classify, GradeOutcome, Status};
pub use domain::roster::{ClassCount, Roster, RosterParseError, RosterRow};
pub use ports::roster_sheet::{ColumnWriteAck, RosterSheet, RosterSheetError};
pub use ports::routine::{Routine, RoutineError};
