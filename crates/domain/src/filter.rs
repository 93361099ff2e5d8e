use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::{ExerciseName, WorkoutEntry, WorkoutLog};

/// Number of days before today covered by the default date range.
pub const DEFAULT_RANGE_DAYS: u64 = 21;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    /// Range ending on `today` and starting `days` before.
    #[must_use]
    pub fn ending_on(today: NaiveDate, days: u64) -> Self {
        Interval {
            first: today.checked_sub_days(Days::new(days)).unwrap_or(today),
            last: today,
        }
    }

    /// An inverted interval contains no dates.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub exercise_name: ExerciseName,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(interval: Interval, exercise_name: ExerciseName) -> Self {
        Self {
            date_start: interval.first,
            date_end: interval.last,
            exercise_name,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        Interval {
            first: self.date_start,
            last: self.date_end,
        }
    }

    #[must_use]
    pub fn matches(&self, entry: &WorkoutEntry) -> bool {
        self.interval().contains(entry.date) && entry.exercise_name == self.exercise_name
    }
}

/// Select all entries of one exercise within the inclusive date range.
///
/// The result keeps the order of the log. An empty result means there is no
/// data for the selection.
#[must_use]
pub fn filter<'a>(log: &'a WorkoutLog, criteria: &FilterCriteria) -> Vec<&'a WorkoutEntry> {
    log.iter().filter(|entry| criteria.matches(entry)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCount {
    pub exercise_name: ExerciseName,
    pub count: usize,
}

impl ExerciseCount {
    /// Label of the exercise selector, e.g. `(12) Bench Press`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("({}) {}", self.count, self.exercise_name)
    }
}

/// Number of entries per exercise within the interval, ordered by exercise name.
#[must_use]
pub fn exercise_counts(log: &WorkoutLog, interval: &Interval) -> Vec<ExerciseCount> {
    let mut counts: BTreeMap<&ExerciseName, usize> = BTreeMap::new();

    for entry in log.iter().filter(|e| interval.contains(e.date)) {
        *counts.entry(&entry.exercise_name).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(exercise_name, count)| ExerciseCount {
            exercise_name: exercise_name.clone(),
            count,
        })
        .collect()
}
