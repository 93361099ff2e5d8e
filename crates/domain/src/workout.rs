use chrono::NaiveDate;
use derive_more::{Display, Into};

use crate::ExerciseName;

/// A single logged set.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub workout_name: String,
    pub exercise_name: ExerciseName,
    pub weight: Weight,
    pub reps: Reps,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if let Ok(parsed_value) = value.parse::<u32>() {
            return Ok(Reps(parsed_value));
        }
        match value.parse::<f64>() {
            Ok(parsed_value) if parsed_value < 0.0 => Err(RepsError::Negative),
            #[allow(clippy::float_cmp)]
            Ok(parsed_value)
                if parsed_value.fract() == 0.0 && parsed_value <= f64::from(u32::MAX) =>
            {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Ok(Reps(parsed_value as u32))
            }
            _ => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepsError {
    #[error("Reps must not be negative")]
    Negative,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Load of a set in pounds. Zero denotes a bodyweight set.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::NotFinite);
        }

        if value < 0.0 {
            return Err(WeightError::Negative);
        }

        // -0.0 passes the check above and must not form its own weight group
        Ok(Self(value.abs()))
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_bodyweight(self) -> bool {
        self.0 == 0.0
    }

    /// Weight used for volume calculations.
    ///
    /// Bodyweight sets count as one pound per rep. Otherwise the volume of
    /// bodyweight exercises would always be zero.
    #[must_use]
    pub fn effective(self) -> f32 {
        if self.is_bodyweight() { 1.0 } else { self.0 }
    }

    pub(crate) fn key(self) -> u32 {
        self.0.to_bits()
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    Negative,
    #[error("Weight must be a finite number")]
    NotFinite,
    #[error("Weight must be a decimal")]
    ParseError,
}
