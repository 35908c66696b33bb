use thiserror::Error;

use super::sheets::{
    column::Column,
    ranges::{roster, CLASS_COUNT_ROW, HEADER_ROWS},
    row::Row,
};

const CLASS_COUNT_SEPARATOR: &str = ": ";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RosterParseError {
    #[error("Class count header (row {row}) is missing")]
    MissingClassCount { row: Row },
    #[error("Class count header {cell:?} has no \": \" separator")]
    MissingClassCountSeparator { cell: String },
    #[error("Class count {value:?} is not a positive number")]
    InvalidClassCount { value: String },
    #[error("Cell {column}{row} is empty")]
    MissingCell { column: Column, row: Row },
    #[error("Cell {column}{row} holds {value:?}, which is not a number")]
    InvalidNumber {
        column: Column,
        row: Row,
        value: String,
    },
}

/// Total number of classes in the term, the denominator of the absence percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassCount(f64);

impl ClassCount {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(ClassCount(value))
    }

    pub fn get(&self) -> f64 {
        self.0
    }

    /// Parses the `"Total de aulas: 20"` header cell.
    pub fn from_header_cell(cell: &str) -> Result<Self, RosterParseError> {
        let value = cell.split(CLASS_COUNT_SEPARATOR).nth(1).ok_or_else(|| {
            RosterParseError::MissingClassCountSeparator {
                cell: cell.to_owned(),
            }
        })?;

        parse_number(value)
            .and_then(ClassCount::new)
            .ok_or_else(|| RosterParseError::InvalidClassCount {
                value: value.to_owned(),
            })
    }
}

/// One student: absences (C) and the three term grades (D, E, F).
///
/// Grades are whole numbers: a fractional grade is truncated when read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterRow {
    pub absences: f64,
    pub p1: i64,
    pub p2: i64,
    pub p3: i64,
}

impl RosterRow {
    pub fn parse(cells: &[String], row: Row) -> Result<Self, RosterParseError> {
        Ok(RosterRow {
            absences: numeric_cell(cells, roster::RO_ABSENCES, row)?,
            p1: grade_cell(cells, roster::RO_P1, row)?,
            p2: grade_cell(cells, roster::RO_P2, row)?,
            p3: grade_cell(cells, roster::RO_P3, row)?,
        })
    }
}

/// The fetched roster range: class count plus every student row, in sheet order.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub class_count: ClassCount,
    pub students: Vec<RosterRow>,
}

impl Roster {
    /// Parses rows as returned by the spreadsheet, header rows included.
    ///
    /// Any malformed cell fails the whole roster so nothing is written from partial data.
    pub fn parse(rows: &[Vec<String>]) -> Result<Self, RosterParseError> {
        let header_row = Row::from_index(CLASS_COUNT_ROW);
        let header_cell = rows
            .get(CLASS_COUNT_ROW)
            .and_then(|row| row.first())
            .ok_or(RosterParseError::MissingClassCount { row: header_row })?;
        let class_count = ClassCount::from_header_cell(header_cell)?;

        let students = rows
            .iter()
            .enumerate()
            .skip(HEADER_ROWS)
            .map(|(index, cells)| RosterRow::parse(cells, Row::from_index(index)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Roster {
            class_count,
            students,
        })
    }
}

/// Cells C..F of a fetched row, for echoing to the log.
pub fn raw_student_cells(cells: &[String]) -> [&str; 4] {
    [
        roster::RO_ABSENCES,
        roster::RO_P1,
        roster::RO_P2,
        roster::RO_P3,
    ]
    .map(|column| cells.get(column.index()).map(String::as_str).unwrap_or(""))
}

/// Accepts `.` or `,` as the decimal separator; sheets in pt-BR format numbers with a comma.
fn parse_number(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn numeric_cell(cells: &[String], column: Column, row: Row) -> Result<f64, RosterParseError> {
    let text = cells
        .get(column.index())
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .ok_or(RosterParseError::MissingCell { column, row })?;

    parse_number(text).ok_or_else(|| RosterParseError::InvalidNumber {
        column,
        row,
        value: text.to_owned(),
    })
}

fn grade_cell(cells: &[String], column: Column, row: Row) -> Result<i64, RosterParseError> {
    numeric_cell(cells, column, row).map(|grade| grade.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn headers(class_count_cell: &str) -> Vec<Vec<String>> {
        vec![
            row(&["Engenharia de Software"]),
            row(&[class_count_cell]),
            row(&["Matricula", "Aluno", "Faltas", "P1", "P2", "P3", "Situação"]),
        ]
    }

    #[test]
    fn test_class_count_from_header() {
        let count = ClassCount::from_header_cell("Total de aulas no semestre: 60").unwrap();
        assert_eq!(count.get(), 60.0);
    }

    #[test]
    fn test_class_count_takes_second_part() {
        let count = ClassCount::from_header_cell("Aulas: 20: extra").unwrap();
        assert_eq!(count.get(), 20.0);
    }

    #[test]
    fn test_class_count_without_separator() {
        assert_eq!(
            ClassCount::from_header_cell("Total de aulas 60"),
            Err(RosterParseError::MissingClassCountSeparator {
                cell: "Total de aulas 60".to_string()
            })
        );
    }

    #[test]
    fn test_class_count_must_be_positive_number() {
        assert!(matches!(
            ClassCount::from_header_cell("Total de aulas: sessenta"),
            Err(RosterParseError::InvalidClassCount { .. })
        ));
        assert!(matches!(
            ClassCount::from_header_cell("Total de aulas: 0"),
            Err(RosterParseError::InvalidClassCount { .. })
        ));
    }

    #[test]
    fn test_roster_skips_header_rows() {
        let mut rows = headers("Total de aulas no semestre: 20");
        rows.push(row(&["1", "Ana", "6", "8", "7", "9"]));
        rows.push(row(&["2", "Bruno", "2", "4", "3", "2"]));

        let roster = Roster::parse(&rows).unwrap();

        assert_eq!(roster.class_count.get(), 20.0);
        assert_eq!(
            roster.students,
            vec![
                RosterRow {
                    absences: 6.0,
                    p1: 8,
                    p2: 7,
                    p3: 9
                },
                RosterRow {
                    absences: 2.0,
                    p1: 4,
                    p2: 3,
                    p3: 2
                },
            ]
        );
    }

    #[test]
    fn test_roster_with_only_headers_has_no_students() {
        let roster = Roster::parse(&headers("Total de aulas: 20")).unwrap();
        assert!(roster.students.is_empty());
    }

    #[test]
    fn test_grades_are_truncated_and_absences_keep_fraction() {
        let parsed = RosterRow::parse(&row(&["", "", "1,5", "7.9", "6,2", " 10 "]), Row::from_row(4))
            .unwrap();
        assert_eq!(
            parsed,
            RosterRow {
                absences: 1.5,
                p1: 7,
                p2: 6,
                p3: 10
            }
        );
    }

    #[test]
    fn test_missing_class_count_row() {
        let rows = vec![row(&["Engenharia de Software"])];
        assert_eq!(
            Roster::parse(&rows),
            Err(RosterParseError::MissingClassCount {
                row: Row::from_row(2)
            })
        );
    }

    #[test]
    fn test_short_row_reports_missing_cell() {
        let mut rows = headers("Total de aulas: 20");
        rows.push(row(&["1", "Ana", "0", "8", "7"]));

        assert_eq!(
            Roster::parse(&rows),
            Err(RosterParseError::MissingCell {
                column: Column::F,
                row: Row::from_row(4)
            })
        );
    }

    #[test]
    fn test_non_numeric_grade_reports_cell() {
        let mut rows = headers("Total de aulas: 20");
        rows.push(row(&["1", "Ana", "0", "8", "7", "9"]));
        rows.push(row(&["2", "Bruno", "1", "oito", "7", "9"]));

        let error = Roster::parse(&rows).unwrap_err();
        assert_eq!(
            error,
            RosterParseError::InvalidNumber {
                column: Column::D,
                row: Row::from_row(5),
                value: "oito".to_string()
            }
        );
        assert_eq!(error.to_string(), "Cell D5 holds \"oito\", which is not a number");
    }

    #[test]
    fn test_raw_student_cells() {
        let cells = row(&["1", "Ana", "3", "8", "7"]);
        assert_eq!(raw_student_cells(&cells), ["3", "8", "7", ""]);
    }

    #[test]
    fn test_exponent_grades_classify_without_overflow() {
        let mut rows = headers("Total de aulas: 20");
        rows.push(row(&["1", "A", "0", "9e18", "9e18", "9e18"]));

        let roster = Roster::parse(&rows).unwrap();
        assert_eq!(roster.students[0].p1, 9_000_000_000_000_000_000);

        let outcome = crate::domain::grading::classify(&roster.students[0], roster.class_count);
        assert_eq!(outcome.status, crate::domain::grading::Status::Approved);
    }
}
