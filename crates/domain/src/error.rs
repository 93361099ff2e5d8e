use std::fmt;

use crate::{NameError, RepsError, WeightError};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A field value of the input could not be converted.
///
/// `row` is the 1-based index of the data row, not counting the header.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("row {row}, column {column}: invalid value \"{value}\" ({kind})")]
pub struct ParseError {
    pub row: usize,
    pub column: &'static str,
    pub value: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    Date,
    ExerciseName(NameError),
    Weight(WeightError),
    Reps(RepsError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Date => write!(f, "Date must be a calendar date"),
            ParseErrorKind::ExerciseName(err) => write!(f, "{err}"),
            ParseErrorKind::Weight(err) => write!(f, "{err}"),
            ParseErrorKind::Reps(err) => write!(f, "{err}"),
        }
    }
}
