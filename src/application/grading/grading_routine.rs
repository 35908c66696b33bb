use std::{fmt, sync::Arc};

use error_stack::ResultExt;
use tracing::instrument;

use crate::{
    domain::{
        grading::{classify, GradeOutcome},
        roster::{raw_student_cells, Roster},
        sheets::{
            a1_notation::sheet_title_of,
            ranges::{self, HEADER_ROWS},
        },
    },
    ports::{
        roster_sheet::RosterSheet,
        routine::{Routine, RoutineError},
    },
};

/// How a grading run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingReport {
    /// The range came back empty; nothing was written.
    NoData,
    /// Only header rows were present; nothing was written.
    NoStudents,
    /// Both columns were written, one outcome per student in sheet order.
    Graded { outcomes: Vec<GradeOutcome> },
}

/// Reads the roster, classifies every student and writes Situação (G) and the final exam
/// target (H) back to the sheet the roster was read from.
pub struct GradingRoutine {
    roster_range: Box<str>,
    write_sheet: Option<String>,
    roster_sheet: Arc<dyn RosterSheet>,
}

impl fmt::Debug for GradingRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradingRoutine")
            .field("roster_range", &self.roster_range)
            .field("write_sheet", &self.write_sheet)
            .finish()
    }
}

impl GradingRoutine {
    pub fn new(roster_range: Box<str>, roster_sheet: Arc<dyn RosterSheet>) -> Self {
        Self {
            write_sheet: sheet_title_of(&roster_range),
            roster_range,
            roster_sheet,
        }
    }

    #[instrument(skip(self), name = "GradingRoutine::grade_roster")]
    pub async fn grade_roster(&self) -> error_stack::Result<GradingReport, RoutineError> {
        tracing::trace!("{}: 📋 Reading roster from {}", self.name(), self.roster_range);
        let rows = self
            .roster_sheet
            .read_rows(&self.roster_range)
            .await
            .change_context(RoutineError::routine_failure("Failed to read roster"))?;

        if rows.is_empty() {
            tracing::info!("No data found.");
            return Ok(GradingReport::NoData);
        }

        tracing::info!("Faltas, P1, P2, P3:");
        for cells in rows.iter().skip(HEADER_ROWS) {
            let [absences, p1, p2, p3] = raw_student_cells(cells);
            tracing::info!("{}, {}, {}, {}", absences, p1, p2, p3);
        }

        let roster = Roster::parse(&rows)
            .change_context(RoutineError::routine_failure("Malformed roster"))
            .attach_printable_lazy(|| format!("Range: {}", self.roster_range))?;

        if roster.students.is_empty() {
            tracing::info!("No student rows below the header rows.");
            return Ok(GradingReport::NoStudents);
        }

        tracing::trace!(
            "{}: 📊 Grading {} students over {} classes",
            self.name(),
            roster.students.len(),
            roster.class_count.get()
        );
        let outcomes = grade_students(&roster);

        let statuses = outcomes
            .iter()
            .map(|outcome| outcome.status.to_string())
            .collect::<Vec<_>>();
        let final_grades = outcomes
            .iter()
            .map(|outcome| outcome.final_approval_grade.to_string())
            .collect::<Vec<_>>();

        let status_range = ranges::status_range(outcomes.len(), self.write_sheet.as_deref());
        tracing::trace!("{}: 📝 Writing statuses to {}", self.name(), status_range);
        let ack = self
            .roster_sheet
            .write_column(&status_range, &statuses)
            .await
            .change_context(RoutineError::routine_failure("Failed to write statuses"))?;
        tracing::info!("{}", ack);

        let grade_range = ranges::final_approval_grade_range(
            outcomes.len(),
            self.write_sheet.as_deref(),
        );
        tracing::trace!(
            "{}: 📝 Writing final approval grades to {}",
            self.name(),
            grade_range
        );
        let ack = self
            .roster_sheet
            .write_column(&grade_range, &final_grades)
            .await
            .change_context(RoutineError::routine_failure(
                "Failed to write final approval grades",
            ))?;
        tracing::info!("{}", ack);

        Ok(GradingReport::Graded { outcomes })
    }
}

/// One outcome per student, in roster order.
pub fn grade_students(roster: &Roster) -> Vec<GradeOutcome> {
    roster
        .students
        .iter()
        .map(|student| classify(student, roster.class_count))
        .collect()
}

#[async_trait::async_trait]
impl Routine for GradingRoutine {
    fn name(&self) -> &str {
        "Roster Grading"
    }

    #[instrument(skip(self), name = "GradingRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        match self.grade_roster().await? {
            GradingReport::Graded { outcomes } => {
                tracing::info!("{}: ✅ Graded {} students", self.name(), outcomes.len());
            }
            GradingReport::NoData | GradingReport::NoStudents => {
                tracing::info!("{}: nothing to grade", self.name());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grading::Status;
    use crate::domain::sheets::column_range::ColumnRange;
    use crate::ports::roster_sheet::{ColumnWriteAck, RosterSheetError};
    use error_stack::report;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeRosterSheet {
        rows: Vec<Vec<String>>,
        fail_read: bool,
        fail_write_at: Option<usize>,
        writes: Mutex<Vec<(String, Vec<String>)>>,
        reads: Mutex<Vec<String>>,
    }

    impl FakeRosterSheet {
        fn with_rows(rows: Vec<Vec<String>>) -> Self {
            Self {
                rows,
                ..Default::default()
            }
        }

        fn writes(&self) -> Vec<(String, Vec<String>)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl RosterSheet for FakeRosterSheet {
        async fn read_rows(
            &self,
            range: &str,
        ) -> error_stack::Result<Vec<Vec<String>>, RosterSheetError> {
            self.reads.lock().unwrap().push(range.to_string());
            if self.fail_read {
                return Err(report!(RosterSheetError::FailedToReadRows));
            }
            Ok(self.rows.clone())
        }

        async fn write_column(
            &self,
            range: &ColumnRange,
            values: &[String],
        ) -> error_stack::Result<ColumnWriteAck, RosterSheetError> {
            let mut writes = self.writes.lock().unwrap();
            if self.fail_write_at == Some(writes.len()) {
                return Err(report!(RosterSheetError::FailedToWriteColumn));
            }
            let a1 = range.to_string();
            writes.push((a1.clone(), values.to_vec()));
            Ok(ColumnWriteAck {
                updated_range: Some(a1),
                updated_rows: Some(values.len() as i32),
                updated_cells: Some(values.len() as i32),
            })
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn roster_rows(students: &[[&str; 4]]) -> Vec<Vec<String>> {
        let mut rows = vec![
            row(&["Engenharia de Software - 2023"]),
            row(&["Total de aulas no semestre: 20"]),
            row(&["Matricula", "Aluno", "Faltas", "P1", "P2", "P3", "Situação"]),
        ];
        for (index, [absences, p1, p2, p3]) in students.iter().enumerate() {
            let id = (index + 1).to_string();
            rows.push(row(&[id.as_str(), "Aluno", *absences, *p1, *p2, *p3]));
        }
        rows
    }

    fn routine(sheet: &Arc<FakeRosterSheet>) -> GradingRoutine {
        GradingRoutine::new("engenharia_de_software".into(), sheet.clone())
    }

    #[tokio::test]
    async fn test_writes_status_then_final_grade_columns() {
        let sheet = Arc::new(FakeRosterSheet::with_rows(roster_rows(&[
            ["6", "8", "7", "9"],
            ["2", "4", "3", "2"],
            ["1", "6", "5", "7"],
            ["0", "50", "50", "50"],
            ["0", "61", "60", "60"],
        ])));

        let report = routine(&sheet).grade_roster().await.unwrap();

        assert_eq!(
            *sheet.reads.lock().unwrap(),
            vec!["engenharia_de_software".to_string()]
        );
        assert_eq!(
            sheet.writes(),
            vec![
                (
                    "'engenharia_de_software'!G4:G8".to_string(),
                    row(&[
                        "Reprovado por Falta",
                        "Reprovado por Nota",
                        "Reprovado por Nota",
                        "Exame Final",
                        "Aprovado"
                    ])
                ),
                (
                    "'engenharia_de_software'!H4:H8".to_string(),
                    row(&["0", "0", "0", "5", "0"])
                ),
            ]
        );
        match report {
            GradingReport::Graded { outcomes } => {
                assert_eq!(outcomes.len(), 5);
                assert_eq!(outcomes[3].status, Status::FinalExam);
            }
            other => panic!("unexpected report {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_range_writes_nothing() {
        let sheet = Arc::new(FakeRosterSheet::default());

        let report = routine(&sheet).grade_roster().await.unwrap();

        assert_eq!(report, GradingReport::NoData);
        assert!(sheet.writes().is_empty());
    }

    #[tokio::test]
    async fn test_headers_only_writes_nothing() {
        let sheet = Arc::new(FakeRosterSheet::with_rows(roster_rows(&[])));

        let report = routine(&sheet).grade_roster().await.unwrap();

        assert_eq!(report, GradingReport::NoStudents);
        assert!(sheet.writes().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_cell_fails_before_any_write() {
        let sheet = Arc::new(FakeRosterSheet::with_rows(roster_rows(&[
            ["0", "8", "7", "9"],
            ["1", "8", "sete", "9"],
        ])));

        let result = routine(&sheet).grade_roster().await;

        assert!(result.is_err());
        assert!(sheet.writes().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_class_count_fails_the_run() {
        let mut rows = roster_rows(&[["0", "8", "7", "9"]]);
        rows[1] = row(&["Total de aulas no semestre 20"]);
        let sheet = Arc::new(FakeRosterSheet::with_rows(rows));

        let report = routine(&sheet).grade_roster().await.unwrap_err();

        assert!(format!("{:?}", report).contains("Total de aulas no semestre 20"));
        assert!(sheet.writes().is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_propagates() {
        let sheet = Arc::new(FakeRosterSheet {
            fail_read: true,
            ..Default::default()
        });

        assert!(routine(&sheet).run().await.is_err());
        assert!(sheet.writes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_status_write_skips_grade_write() {
        let sheet = Arc::new(FakeRosterSheet {
            rows: roster_rows(&[["0", "8", "7", "9"]]),
            fail_write_at: Some(0),
            ..Default::default()
        });

        assert!(routine(&sheet).run().await.is_err());
        assert!(sheet.writes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_grade_write_keeps_status_write() {
        let sheet = Arc::new(FakeRosterSheet {
            rows: roster_rows(&[["0", "8", "7", "9"]]),
            fail_write_at: Some(1),
            ..Default::default()
        });

        assert!(routine(&sheet).run().await.is_err());
        assert_eq!(
            sheet.writes(),
            vec![(
                "'engenharia_de_software'!G4:G4".to_string(),
                row(&["Reprovado por Nota"])
            )]
        );
    }

    #[tokio::test]
    async fn test_rerun_on_same_data_writes_same_values() {
        let sheet = Arc::new(FakeRosterSheet::with_rows(roster_rows(&[
            ["6", "8", "7", "9"],
            ["0", "50", "50", "50"],
        ])));
        let routine = routine(&sheet);

        routine.run().await.unwrap();
        routine.run().await.unwrap();

        let writes = sheet.writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes[0], writes[2]);
        assert_eq!(writes[1], writes[3]);
    }

    #[tokio::test]
    async fn test_writes_land_on_the_sheet_that_was_read() {
        let sheet = Arc::new(FakeRosterSheet::with_rows(roster_rows(&[
            ["0", "61", "60", "60"],
            ["0", "50", "50", "50"],
        ])));

        GradingRoutine::new("turma_b!A1:F30".into(), sheet.clone())
            .grade_roster()
            .await
            .unwrap();

        let ranges = sheet
            .writes()
            .into_iter()
            .map(|(range, _)| range)
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec!["'turma_b'!G4:G5", "'turma_b'!H4:H5"]);
    }

    #[tokio::test]
    async fn test_range_without_sheet_writes_without_sheet() {
        let sheet = Arc::new(FakeRosterSheet::with_rows(roster_rows(&[[
            "0", "61", "60", "60",
        ]])));

        GradingRoutine::new("A1:F30".into(), sheet.clone())
            .grade_roster()
            .await
            .unwrap();

        let ranges = sheet
            .writes()
            .into_iter()
            .map(|(range, _)| range)
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec!["G4:G4", "H4:H4"]);
    }

    #[test]
    fn test_grade_students_keeps_order() {
        let roster = Roster::parse(&roster_rows(&[
            ["0", "61", "60", "60"],
            ["9", "61", "60", "60"],
            ["0", "1", "1", "1"],
        ]))
        .unwrap();

        let statuses = grade_students(&roster)
            .into_iter()
            .map(|outcome| outcome.status)
            .collect::<Vec<_>>();

        assert_eq!(
            statuses,
            vec![Status::Approved, Status::FailedByAbsence, Status::FailedByGrade]
        );
    }
}
