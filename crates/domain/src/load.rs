use std::{fs::File, io, path::Path};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;

use crate::{
    ExerciseName, LoadError, ParseError, ParseErrorKind, Reps, SchemaError, Weight, WorkoutEntry,
    WorkoutLog,
};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Load a workout log from delimited text.
///
/// The header row is normalized by replacing spaces with underscores. The
/// columns listed in [`WorkoutLog::COLUMNS`] must be present after
/// normalization; all other columns are discarded.
///
/// Any value that cannot be parsed rejects the whole input.
pub fn load<R: io::Read>(input: R) -> Result<WorkoutLog, LoadError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(input);
    let columns = locate_columns(reader.headers()?)?;

    let mut entries = vec![];

    for (i, record) in reader.records().enumerate() {
        entries.push(parse_record(&record?, &columns, i + 1)?);
    }

    debug!("loaded {} workout entries", entries.len());

    Ok(WorkoutLog::new(entries))
}

pub fn load_path(path: &Path) -> Result<WorkoutLog, LoadError> {
    load(File::open(path)?)
}

#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Parse a calendar date, discarding any time of day.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date_time| date_time.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        })
}

struct Columns {
    date: usize,
    workout_name: usize,
    exercise_name: usize,
    weight: usize,
    reps: usize,
}

fn locate_columns(header: &csv::StringRecord) -> Result<Columns, SchemaError> {
    let names = header
        .iter()
        .map(normalize_column_name)
        .collect::<Vec<_>>();
    let position = |column: &str| names.iter().position(|name| name == column);

    let [date, workout_name, exercise_name, weight, reps] = WorkoutLog::COLUMNS.map(position);

    match (date, workout_name, exercise_name, weight, reps) {
        (Some(date), Some(workout_name), Some(exercise_name), Some(weight), Some(reps)) => {
            Ok(Columns {
                date,
                workout_name,
                exercise_name,
                weight,
                reps,
            })
        }
        _ => Err(SchemaError::MissingColumns(
            WorkoutLog::COLUMNS
                .into_iter()
                .filter(|&column| position(column).is_none())
                .map(ToString::to_string)
                .collect(),
        )),
    }
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &Columns,
    row: usize,
) -> Result<WorkoutEntry, ParseError> {
    let field = |index: usize| record.get(index).unwrap_or_default();
    let error = |column: &'static str, value: &str, kind: ParseErrorKind| ParseError {
        row,
        column,
        value: value.to_string(),
        kind,
    };

    let date = field(columns.date);
    let exercise_name = field(columns.exercise_name);
    let weight = field(columns.weight);
    let reps = field(columns.reps);

    Ok(WorkoutEntry {
        date: parse_date(date).ok_or_else(|| error("Date", date, ParseErrorKind::Date))?,
        workout_name: field(columns.workout_name).trim().to_string(),
        exercise_name: ExerciseName::new(exercise_name).map_err(|err| {
            error("Exercise_Name", exercise_name, ParseErrorKind::ExerciseName(err))
        })?,
        weight: Weight::try_from(weight)
            .map_err(|err| error("Weight", weight, ParseErrorKind::Weight(err)))?,
        reps: Reps::try_from(reps).map_err(|err| error("Reps", reps, ParseErrorKind::Reps(err)))?,
    })
}
