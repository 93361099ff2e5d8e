use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{ExerciseName, WorkoutEntry};

/// Normalized workout log.
///
/// Entries keep the order of the input. The table cannot be modified after
/// construction; a new input produces a new table.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutLog {
    entries: Vec<WorkoutEntry>,
}

impl WorkoutLog {
    /// Columns of the normalized table, in order.
    pub const COLUMNS: [&'static str; 5] =
        ["Date", "Workout_Name", "Exercise_Name", "Weight", "Reps"];

    #[must_use]
    pub fn new(entries: Vec<WorkoutEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkoutEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn exercises(&self) -> BTreeSet<&ExerciseName> {
        self.entries.iter().map(|e| &e.exercise_name).collect()
    }

    /// First and last date of the log.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.entries.iter().map(|e| e.date).min()?;
        let last = self.entries.iter().map(|e| e.date).max()?;
        Some((first, last))
    }
}

impl FromIterator<WorkoutEntry> for WorkoutLog {
    fn from_iter<T: IntoIterator<Item = WorkoutEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WorkoutLog {
    type Item = &'a WorkoutEntry;
    type IntoIter = std::slice::Iter<'a, WorkoutEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
