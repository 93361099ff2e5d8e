use derive_more::{AsRef, Display};

/// Identifier of an exercise.
///
/// Matching is exact and case-sensitive. Surrounding whitespace is removed on
/// construction so that `"Squat "` and `"Squat"` in the same log refer to the
/// same exercise.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseName(String);

impl ExerciseName {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        Ok(ExerciseName(trimmed_name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ExerciseName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ExerciseName::new(value)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Exercise name must not be empty")]
    Empty,
}
