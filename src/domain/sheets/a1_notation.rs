use std::fmt::Formatter;

use super::column::Column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

/// Prefixes a local range with its sheet title, quoting the title as the Sheets API expects.
pub fn with_sheet_prefix(local: String, sheet_name: Option<&str>) -> A1Notation {
    match sheet_name {
        Some(sheet_name) => A1Notation(format!("'{}'!{}", sheet_name.replace('\'', "''"), local)),
        None => A1Notation(local),
    }
}

/// Longest column reference the Sheets grid accepts (`ZZZ`).
const MAX_COLUMN_LETTERS: usize = 3;

/// Sheet title a range points at, unquoted.
///
/// `'Turma B'!A1:F30` and `turma_b!A:F` name their sheet before the `!`. A range without `!` is
/// a bare sheet title unless it reads as a cell reference like `A1:F30`, which has no sheet.
pub fn sheet_title_of(range: &str) -> Option<String> {
    let range = range.trim();
    let title = match range.rsplit_once('!') {
        Some((title, _)) => title,
        None if is_cell_reference(range) => return None,
        None => range,
    };

    let title = match title.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        Some(quoted) => quoted.replace("''", "'"),
        None => title.to_string(),
    };

    (!title.is_empty()).then_some(title)
}

fn is_cell_reference(range: &str) -> bool {
    range.split(':').all(|part| {
        let part = part.replace('$', "");
        let digits_start = part
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(part.len());
        let (letters, digits) = part.split_at(digits_start);

        let column_ok = letters.is_empty()
            || (letters.len() <= MAX_COLUMN_LETTERS && letters.parse::<Column>().is_ok());
        let row_ok = digits.chars().all(|c| c.is_ascii_digit());

        !part.is_empty() && column_ok && row_ok
    })
}
