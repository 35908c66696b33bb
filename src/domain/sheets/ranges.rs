// The roster layout is fixed, so its columns are hardcoded here rather than read from named ranges

use super::{column::Column, column_range::ColumnRange, row::Row};

/// Rows above the first student: title, class count, column labels.
pub const HEADER_ROWS: usize = 3;

/// Zero-based row whose first cell reads `"<label>: <N>"`.
pub const CLASS_COUNT_ROW: usize = 1;

pub mod roster {
    use super::Column;

    pub const RO_ABSENCES: Column = Column::C;
    pub const RO_P1: Column = Column::D;
    pub const RO_P2: Column = Column::E;
    pub const RO_P3: Column = Column::F;
    pub const RW_STATUS: Column = Column::G;
    pub const RW_FINAL_APPROVAL_GRADE: Column = Column::H;
}

/// First spreadsheet row holding a student.
pub fn first_student_row() -> Row {
    Row::from_index(HEADER_ROWS)
}

/// `G4:G{3 + student_count}` on the roster's sheet.
pub fn status_range(student_count: usize, sheet_title: Option<&str>) -> ColumnRange {
    student_column(roster::RW_STATUS, student_count, sheet_title)
}

/// `H4:H{3 + student_count}` on the roster's sheet.
pub fn final_approval_grade_range(
    student_count: usize,
    sheet_title: Option<&str>,
) -> ColumnRange {
    student_column(roster::RW_FINAL_APPROVAL_GRADE, student_count, sheet_title)
}

fn student_column(
    column: Column,
    student_count: usize,
    sheet_title: Option<&str>,
) -> ColumnRange {
    let range = ColumnRange::from_start(column, first_student_row(), student_count);
    match sheet_title {
        Some(sheet_title) => range.with_sheet_title(sheet_title),
        None => range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheets::a1_notation::ToA1Notation;

    #[test]
    fn test_output_ranges_follow_student_count() {
        assert_eq!(status_range(20, None).to_a1_notation(None).as_ref(), "G4:G23");
        assert_eq!(
            final_approval_grade_range(20, None).to_a1_notation(None).as_ref(),
            "H4:H23"
        );
    }

    #[test]
    fn test_output_ranges_carry_sheet_title() {
        assert_eq!(status_range(2, Some("turma_b")).to_string(), "'turma_b'!G4:G5");
        assert_eq!(
            final_approval_grade_range(2, Some("turma_b")).to_string(),
            "'turma_b'!H4:H5"
        );
    }

    #[test]
    fn test_first_student_row() {
        assert_eq!(first_student_row().row(), 4);
    }
}
