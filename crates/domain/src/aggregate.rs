use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{Weight, WorkoutEntry};

/// Derived views of a filtered workout log.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub peak_set: WorkoutEntry,
    pub daily_max_weight: Vec<(NaiveDate, Weight)>,
    pub daily_volume: Vec<(NaiveDate, f64)>,
    pub daily_total_reps: Vec<(NaiveDate, u64)>,
}

/// Compute all views at once.
///
/// Returns `None` if there are no entries, in which case there is nothing to
/// show for the selection.
#[must_use]
pub fn summarize(entries: &[&WorkoutEntry]) -> Option<Summary> {
    Some(Summary {
        peak_set: peak_set(entries)?.clone(),
        daily_max_weight: daily_max_weight(entries),
        daily_volume: daily_volume(entries),
        daily_total_reps: daily_total_reps(entries),
    })
}

/// The entry with the highest weight.
///
/// If several entries share the highest weight, the first of them is returned.
#[must_use]
pub fn peak_set<'a>(entries: &[&'a WorkoutEntry]) -> Option<&'a WorkoutEntry> {
    entries.iter().copied().fold(None, |peak, entry| match peak {
        Some(p) if p.weight >= entry.weight => Some(p),
        _ => Some(entry),
    })
}

#[must_use]
pub fn daily_max_weight(entries: &[&WorkoutEntry]) -> Vec<(NaiveDate, Weight)> {
    let mut result: BTreeMap<NaiveDate, Weight> = BTreeMap::new();

    for entry in entries {
        result
            .entry(entry.date)
            .and_modify(|w| {
                if entry.weight > *w {
                    *w = entry.weight;
                }
            })
            .or_insert(entry.weight);
    }

    result.into_iter().collect()
}

#[must_use]
pub fn daily_total_reps(entries: &[&WorkoutEntry]) -> Vec<(NaiveDate, u64)> {
    let mut result: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for entry in entries {
        let reps = result.entry(entry.date).or_default();
        *reps = reps.saturating_add(u64::from(u32::from(entry.reps)));
    }

    result.into_iter().collect()
}

/// Training volume per day.
///
/// Reps are first summed for every weight of a day. Each of these sums is
/// multiplied by its effective weight (see [`Weight::effective`]) and the
/// products are added up per day.
///
/// The volume is computed in `f64`, so it stays finite for any valid weight
/// and rep count.
#[must_use]
pub fn daily_volume(entries: &[&WorkoutEntry]) -> Vec<(NaiveDate, f64)> {
    let mut reps_by_weight: BTreeMap<NaiveDate, BTreeMap<u32, (Weight, u64)>> = BTreeMap::new();

    for entry in entries {
        let (_, reps) = reps_by_weight
            .entry(entry.date)
            .or_default()
            .entry(entry.weight.key())
            .or_insert((entry.weight, 0));
        *reps = reps.saturating_add(u64::from(u32::from(entry.reps)));
    }

    #[allow(clippy::cast_precision_loss)]
    reps_by_weight
        .into_iter()
        .map(|(date, groups)| {
            (
                date,
                groups
                    .into_values()
                    .map(|(weight, reps)| reps as f64 * f64::from(weight.effective()))
                    .sum(),
            )
        })
        .collect()
}
