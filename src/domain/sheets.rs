pub mod a1_notation;
pub mod column;
pub mod column_range;
pub mod ranges;
pub mod row;
