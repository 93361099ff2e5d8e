use std::fmt::Write;

use chrono::{Datelike, NaiveDate};
use html_escape::encode_text;
use log::{debug, warn};
use overload_domain::{
    ExerciseCount, ExerciseName, FilterCriteria, Interval, Summary, WorkoutEntry, WorkoutLog,
    exercise_counts, filter, summarize,
};
use strum::IntoEnumIterator;

use crate::{
    Settings,
    chart::{self, COLOR_REPS, COLOR_VOLUME, COLOR_WEIGHT, PlotData, plot_line_with_markers},
};

pub const TITLE: &str = "Progressive Overload Dashboard";
pub const MESSAGE_NO_EXERCISES: &str = "No exercises found in this date range.";
pub const MESSAGE_NO_DATA: &str = "No data available for this exercise and date range.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Series {
    #[strum(to_string = "Weight Over Time")]
    MaxWeight,
    #[strum(to_string = "Volume Over Time")]
    Volume,
    #[strum(to_string = "Reps Over Time")]
    TotalReps,
}

impl Series {
    #[must_use]
    pub fn color(self) -> usize {
        match self {
            Series::MaxWeight => COLOR_WEIGHT,
            Series::Volume => COLOR_VOLUME,
            Series::TotalReps => COLOR_REPS,
        }
    }

    #[must_use]
    pub fn values(self, summary: &Summary) -> Vec<(NaiveDate, f32)> {
        match self {
            Series::MaxWeight => summary
                .daily_max_weight
                .iter()
                .map(|(date, weight)| (*date, f32::from(*weight)))
                .collect(),
            #[allow(clippy::cast_possible_truncation)]
            Series::Volume => summary
                .daily_volume
                .iter()
                .map(|(date, volume)| (*date, *volume as f32))
                .collect(),
            #[allow(clippy::cast_precision_loss)]
            Series::TotalReps => summary
                .daily_total_reps
                .iter()
                .map(|(date, reps)| (*date, *reps as f32))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// Headline figures of the peak set.
#[must_use]
pub fn metrics(peak_set: &WorkoutEntry) -> [Metric; 3] {
    [
        Metric {
            label: "Max Weight (lbs)".to_string(),
            value: peak_set.weight.to_string(),
        },
        Metric {
            label: format!("Max Reps @ {} lbs", peak_set.weight),
            value: peak_set.reps.to_string(),
        },
        Metric {
            label: "Max Weight Date".to_string(),
            value: format_date(peak_set.date),
        },
    ]
}

/// Format a date as `M/D/YYYY`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub series: Series,
    pub svg: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// The date range contains no entries at all.
    NoExercises { interval: Interval },
    /// The selected exercise has no entries in the date range.
    NoData {
        exercises: Vec<ExerciseCount>,
        criteria: FilterCriteria,
    },
    Ready {
        exercises: Vec<ExerciseCount>,
        criteria: FilterCriteria,
        summary: Summary,
        charts: Vec<Chart>,
    },
}

/// Run one full pass from the workout log to a report.
///
/// If no exercise is given, the first exercise of the selector list is used.
pub fn render(
    log: &WorkoutLog,
    interval: Interval,
    exercise: Option<&ExerciseName>,
    settings: &Settings,
) -> Result<Report, Box<dyn std::error::Error>> {
    let exercises = exercise_counts(log, &interval);

    let Some(exercise_name) = exercise
        .or_else(|| exercises.first().map(|e| &e.exercise_name))
        .cloned()
    else {
        warn!(
            "no exercises between {} and {}",
            interval.first, interval.last
        );
        return Ok(Report::NoExercises { interval });
    };

    let criteria = FilterCriteria::new(interval, exercise_name);
    let entries = filter(log, &criteria);

    debug!(
        "selected {} entries of {}",
        entries.len(),
        criteria.exercise_name
    );

    let Some(summary) = summarize(&entries) else {
        warn!("no entries of {} in date range", criteria.exercise_name);
        return Ok(Report::NoData {
            exercises,
            criteria,
        });
    };

    let charts = Series::iter()
        .map(|series| -> Result<Chart, Box<dyn std::error::Error>> {
            Ok(Chart {
                series,
                svg: chart::plot(
                    &[PlotData {
                        values: series.values(&summary),
                        plots: plot_line_with_markers(series.color()),
                    }],
                    &series.to_string(),
                    settings,
                )?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Report::Ready {
        exercises,
        criteria,
        summary,
        charts,
    })
}

impl Report {
    /// Render the report as a self-contained HTML page.
    #[must_use]
    pub fn to_html(&self, settings: &Settings) -> String {
        let mut body = String::new();

        match self {
            Report::NoExercises { interval } => {
                write_range(&mut body, *interval);
                write_message(&mut body, MESSAGE_NO_EXERCISES);
            }
            Report::NoData {
                exercises,
                criteria,
            } => {
                write_range(&mut body, criteria.interval());
                write_selector(&mut body, exercises, &criteria.exercise_name);
                write_message(&mut body, MESSAGE_NO_DATA);
            }
            Report::Ready {
                exercises,
                criteria,
                summary,
                charts,
            } => {
                write_range(&mut body, criteria.interval());
                write_selector(&mut body, exercises, &criteria.exercise_name);
                let _ = writeln!(body, "<div class=\"metrics\">");
                for metric in metrics(&summary.peak_set) {
                    let _ = writeln!(
                        body,
                        "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
                        encode_text(&metric.label),
                        encode_text(&metric.value)
                    );
                }
                let _ = writeln!(body, "</div>");
                for chart in charts {
                    if let Some(svg) = &chart.svg {
                        let _ = writeln!(body, "<figure>{svg}</figure>");
                    }
                }
            }
        }

        format!(
            "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{TITLE}</title>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
body.dark {{ background: #14161a; color: #fff; }}
.metrics {{ display: flex; gap: 3em; margin: 1em 0; }}
.metric .value {{ font-size: 2em; }}
.selected {{ font-weight: bold; }}
.message {{ padding: 1em; border: 1px solid #e0b000; }}
figure {{ margin: 1em 0; }}
</style>
</head>
<body class=\"{}\">
<h1>{TITLE}</h1>
{body}</body>
</html>
",
            settings.theme
        )
    }
}

fn write_range(body: &mut String, interval: Interval) {
    let _ = writeln!(
        body,
        "<p>{} to {}</p>",
        format_date(interval.first),
        format_date(interval.last)
    );
}

fn write_selector(body: &mut String, exercises: &[ExerciseCount], selected: &ExerciseName) {
    let _ = writeln!(body, "<ul class=\"exercises\">");
    for exercise in exercises {
        let class = if &exercise.exercise_name == selected {
            " class=\"selected\""
        } else {
            ""
        };
        let _ = writeln!(body, "<li{class}>{}</li>", encode_text(&exercise.label()));
    }
    let _ = writeln!(body, "</ul>");
}

fn write_message(body: &mut String, message: &str) {
    let _ = writeln!(body, "<p class=\"message\">{message}</p>");
}

#[cfg(test)]
mod tests {
    use overload_domain::{Reps, Weight};
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn name(name: &str) -> ExerciseName {
        ExerciseName::new(name).unwrap()
    }

    fn entry(date: NaiveDate, exercise: &str, weight: f32, reps: u32) -> WorkoutEntry {
        WorkoutEntry {
            date,
            workout_name: "Workout".to_string(),
            exercise_name: name(exercise),
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps),
        }
    }

    #[fixture]
    fn log() -> WorkoutLog {
        WorkoutLog::from_iter([
            entry(date(3, 4), "Bench Press", 135.0, 5),
            entry(date(3, 4), "Bench Press", 155.0, 3),
            entry(date(3, 6), "Pull Up", 0.0, 8),
            entry(date(3, 6), "Pull Up", 0.0, 6),
            entry(date(3, 11), "Bench Press", 145.0, 5),
            entry(date(3, 13), "Pull Up <Weighted>", 25.0, 5),
        ])
    }

    #[rstest]
    fn test_metrics() {
        assert_eq!(
            metrics(&entry(date(3, 4), "Bench Press", 155.0, 3)),
            [
                Metric {
                    label: "Max Weight (lbs)".to_string(),
                    value: "155".to_string(),
                },
                Metric {
                    label: "Max Reps @ 155 lbs".to_string(),
                    value: "3".to_string(),
                },
                Metric {
                    label: "Max Weight Date".to_string(),
                    value: "3/4/2024".to_string(),
                },
            ]
        );
    }

    #[rstest]
    #[case(date(1, 5), "1/5/2024")]
    #[case(date(12, 31), "12/31/2024")]
    fn test_format_date(#[case] date: NaiveDate, #[case] expected: &str) {
        assert_eq!(format_date(date), expected);
    }

    #[rstest]
    fn test_series_values() {
        let summary = Summary {
            peak_set: entry(date(3, 4), "Pull Up", 0.0, 8),
            daily_max_weight: vec![(date(3, 4), Weight::new(0.0).unwrap())],
            daily_volume: vec![(date(3, 4), 14.0)],
            daily_total_reps: vec![(date(3, 4), 14)],
        };
        assert_eq!(
            Series::iter()
                .map(|series| series.values(&summary))
                .collect::<Vec<_>>(),
            vec![
                vec![(date(3, 4), 0.0)],
                vec![(date(3, 4), 14.0)],
                vec![(date(3, 4), 14.0)],
            ]
        );
    }

    #[rstest]
    fn test_render_ready(log: WorkoutLog) {
        let report = render(
            &log,
            (date(3, 1)..=date(3, 11)).into(),
            Some(&name("Bench Press")),
            &Settings::default(),
        )
        .unwrap();

        let Report::Ready {
            exercises,
            criteria,
            summary,
            charts,
        } = report
        else {
            panic!("unexpected report");
        };

        assert_eq!(
            exercises
                .iter()
                .map(ExerciseCount::label)
                .collect::<Vec<_>>(),
            vec!["(3) Bench Press", "(2) Pull Up"]
        );
        assert_eq!(criteria.exercise_name, name("Bench Press"));
        assert_eq!(summary.peak_set, log.entries()[1]);
        assert_eq!(
            charts.iter().map(|c| c.series).collect::<Vec<_>>(),
            vec![Series::MaxWeight, Series::Volume, Series::TotalReps]
        );
        assert!(charts.iter().all(|c| c.svg.is_some()));
    }

    #[rstest]
    fn test_render_selects_first_exercise_by_default(log: WorkoutLog) {
        let report = render(
            &log,
            (date(3, 5)..=date(3, 31)).into(),
            None,
            &Settings::default(),
        )
        .unwrap();

        assert!(matches!(
            report,
            Report::Ready { criteria, .. } if criteria.exercise_name == name("Bench Press")
        ));
    }

    #[rstest]
    fn test_render_no_exercises(log: WorkoutLog) {
        let interval = (date(4, 1)..=date(4, 30)).into();
        assert_eq!(
            render(&log, interval, None, &Settings::default()).unwrap(),
            Report::NoExercises { interval }
        );
    }

    #[rstest]
    fn test_render_no_data(log: WorkoutLog) {
        let report = render(
            &log,
            (date(3, 1)..=date(3, 5)).into(),
            Some(&name("Pull Up")),
            &Settings::default(),
        )
        .unwrap();

        assert!(matches!(report, Report::NoData { .. }));
        assert!(
            report
                .to_html(&Settings::default())
                .contains(MESSAGE_NO_DATA)
        );
    }

    #[rstest]
    fn test_render_skips_chart_of_unplottable_volume() {
        let log = WorkoutLog::from_iter([
            entry(date(3, 4), "Sled Push", 3e38, 1),
            entry(date(3, 4), "Sled Push", 2e38, 1),
        ]);

        let Report::Ready { summary, charts, .. } = render(
            &log,
            (date(3, 1)..=date(3, 31)).into(),
            None,
            &Settings::default(),
        )
        .unwrap() else {
            panic!("unexpected report");
        };

        assert!(summary.daily_volume[0].1.is_finite());
        assert_eq!(
            charts
                .iter()
                .find(|c| c.series == Series::Volume)
                .map(|c| c.svg.is_none()),
            Some(true)
        );
    }

    #[rstest]
    fn test_to_html_escapes_exercise_names(log: WorkoutLog) {
        let html = render(
            &log,
            (date(3, 1)..=date(3, 31)).into(),
            Some(&name("Pull Up <Weighted>")),
            &Settings::default(),
        )
        .unwrap()
        .to_html(&Settings::default());

        assert!(html.contains("(1) Pull Up &lt;Weighted&gt;"));
        assert!(!html.contains("<Weighted>"));
        assert!(html.contains("Max Reps @ 25 lbs"));
    }
}
