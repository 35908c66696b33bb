use strum::Display;

use super::roster::{ClassCount, RosterRow};

/// Absence percentage above which a student fails regardless of grades.
pub const MAX_ABSENCE_PERCENTAGE: f64 = 25.0;

/// Sum of the three grades is divided by this before rounding up.
pub const GRADE_SUM_DIVISOR: f64 = 30.0;

pub const FINAL_EXAM_MIN_MEAN: i64 = 5;
pub const APPROVAL_MIN_MEAN: i64 = 7;

/// The final exam target is this minus the mean grade.
pub const FINAL_EXAM_PASSING_SUM: i64 = 10;

/// Situação written to column G. The text is exactly what the sheet expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Status {
    #[strum(serialize = "Reprovado por Falta")]
    FailedByAbsence,
    #[strum(serialize = "Reprovado por Nota")]
    FailedByGrade,
    #[strum(serialize = "Exame Final")]
    FinalExam,
    #[strum(serialize = "Aprovado")]
    Approved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeOutcome {
    pub status: Status,
    /// Grade needed on the final exam; 0 unless the status is [`Status::FinalExam`].
    pub final_approval_grade: i64,
}

impl GradeOutcome {
    fn without_exam(status: Status) -> Self {
        Self {
            status,
            final_approval_grade: 0,
        }
    }
}

/// `ceil(absences * 100 / classes)`.
pub fn absence_percentage(absences: f64, class_count: ClassCount) -> f64 {
    (absences * 100.0 / class_count.get()).ceil()
}

/// `ceil((p1 + p2 + p3) / 30)`, summed in floating point so huge grade cells cannot overflow.
///
/// Not the arithmetic mean of the three grades: with grades in 0..=10 the result is at most 1.
pub fn mean_grade(p1: i64, p2: i64, p3: i64) -> i64 {
    ((p1 as f64 + p2 as f64 + p3 as f64) / GRADE_SUM_DIVISOR).ceil() as i64
}

/// Status band for a mean grade, ignoring absences.
pub fn grade_band(mean: i64) -> GradeOutcome {
    if mean < FINAL_EXAM_MIN_MEAN {
        GradeOutcome::without_exam(Status::FailedByGrade)
    } else if mean < APPROVAL_MIN_MEAN {
        GradeOutcome {
            status: Status::FinalExam,
            final_approval_grade: FINAL_EXAM_PASSING_SUM - mean,
        }
    } else {
        GradeOutcome::without_exam(Status::Approved)
    }
}

/// Classifies one student. Failing by absence takes precedence over any grade.
pub fn classify(student: &RosterRow, class_count: ClassCount) -> GradeOutcome {
    if absence_percentage(student.absences, class_count) > MAX_ABSENCE_PERCENTAGE {
        return GradeOutcome::without_exam(Status::FailedByAbsence);
    }

    grade_band(mean_grade(student.p1, student.p2, student.p3))
}
