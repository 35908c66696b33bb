pub mod grading;
pub mod roster;
pub mod sheets;
