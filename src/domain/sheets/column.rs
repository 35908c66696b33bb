use std::{fmt::Formatter, str::FromStr};

use thiserror::Error;

/// A spreadsheet column, 1-based (`A` is 1, `Z` is 26, `AA` is 27).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u32);

impl Column {
    pub const C: Column = Column(3);
    pub const D: Column = Column(4);
    pub const E: Column = Column(5);
    pub const F: Column = Column(6);
    pub const G: Column = Column(7);
    pub const H: Column = Column(8);

    /// Zero-based position of this column inside a fetched row.
    pub fn index(&self) -> usize {
        self.0 as usize - 1
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column({})", self)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnParseError {
    #[error("Empty column")]
    Empty,
    #[error("Non-alphabetic character in column")]
    NonAlphabeticCharacter,
}

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ColumnParseError::Empty);
        }
        if s.chars().any(|c| !c.is_ascii_alphabetic()) {
            return Err(ColumnParseError::NonAlphabeticCharacter);
        }

        let col_num = s
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .fold(0, |acc, c| acc * 26 + (c as u32 - 'A' as u32 + 1));

        Ok(Column(col_num))
    }
}

fn number_to_letters(mut number: u32) -> String {
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        result.push((remainder as u8 + b'A') as char);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}
