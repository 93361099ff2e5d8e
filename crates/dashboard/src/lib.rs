#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod chart;
pub mod log;
pub mod report;
mod settings;

pub use settings::{Settings, Theme};

/// Strong-style export used when no input file is given.
pub const SAMPLE_DATA: &str = include_str!("../data/strong_sample.csv");
