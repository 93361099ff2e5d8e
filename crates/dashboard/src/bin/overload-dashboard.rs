use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, ValueHint};
use log::{LevelFilter, info};
use overload_dashboard::{SAMPLE_DATA, Settings, Theme, report};
use overload_domain::{ExerciseName, Interval, TableCache, exercise_counts, parse_date};

#[derive(Parser, Debug)]
#[command(author, version, about = "Progressive overload dashboard for workout logs", long_about = None)]
struct Cli {
    /// Workout log in CSV format (defaults to the bundled sample data, whose
    /// default range ends on its last recorded date)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// First date of the range (defaults to 21 days before the end date)
    #[arg(long, value_parser = parse_date_arg)]
    start: Option<NaiveDate>,

    /// Last date of the range (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    end: Option<NaiveDate>,

    /// Exercise to analyze (defaults to the first exercise in the range)
    #[arg(short, long)]
    exercise: Option<String>,

    /// Output HTML report path
    #[arg(short, long, default_value = "dashboard.html", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Print the exercises within the range and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_exercises: bool,

    #[arg(long, value_enum, default_value_t = Theme::Light)]
    theme: Theme,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn settings(&self) -> Settings {
        Settings {
            theme: self.theme,
            ..Settings::default()
        }
    }

    fn interval(&self, settings: &Settings, default_end: NaiveDate) -> Interval {
        let end = self.end.unwrap_or(default_end);
        let default = settings.default_interval(end);
        Interval {
            first: self.start.unwrap_or(default.first),
            last: end,
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date: {value}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    overload_dashboard::log::init(cli.log_level())
        .map_err(|err| anyhow::anyhow!("initializing logger: {err}"))?;

    let settings = cli.settings();

    let input = match &cli.input {
        Some(path) => {
            fs::read(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            info!("using bundled sample data");
            SAMPLE_DATA.as_bytes().to_vec()
        }
    };

    let mut cache = TableCache::new();
    let log = cache
        .get_or_load(&input)
        .context("cannot process this input")?;

    let today = Local::now().date_naive();
    let default_end = match cli.input {
        Some(_) => today,
        None => log.date_span().map_or(today, |(_, last)| last),
    };
    let interval = cli.interval(&settings, default_end);

    if cli.list_exercises {
        for exercise in exercise_counts(log, &interval) {
            println!("{}", exercise.label());
        }
        return Ok(());
    }

    let exercise = cli
        .exercise
        .as_deref()
        .map(ExerciseName::new)
        .transpose()
        .context("invalid exercise")?;

    let report = report::render(log, interval, exercise.as_ref(), &settings)
        .map_err(|err| anyhow::anyhow!("rendering charts: {err}"))?;

    match &report {
        report::Report::NoExercises { .. } => eprintln!("{}", report::MESSAGE_NO_EXERCISES),
        report::Report::NoData { .. } => eprintln!("{}", report::MESSAGE_NO_DATA),
        report::Report::Ready { summary, .. } => {
            for metric in report::metrics(&summary.peak_set) {
                println!("{}: {}", metric.label, metric.value);
            }
        }
    }

    fs::write(&cli.output, report.to_html(&settings))
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("report written to {}", cli.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[rstest]
    #[case::defaults(&[], (date(4, 5), date(4, 26)))]
    #[case::end_given(&["--end", "2024-03-31"], (date(3, 10), date(3, 31)))]
    #[case::start_given(&["--start", "2024-01-02"], (date(1, 2), date(4, 26)))]
    #[case::both_given(
        &["--start", "2024-02-01", "--end", "2024-02-29"],
        (date(2, 1), date(2, 29))
    )]
    fn test_cli_interval(#[case] args: &[&str], #[case] expected: (NaiveDate, NaiveDate)) {
        let cli =
            Cli::try_parse_from(std::iter::once("overload-dashboard").chain(args.iter().copied()))
                .unwrap();
        let interval = cli.interval(&cli.settings(), date(4, 26));
        assert_eq!((interval.first, interval.last), expected);
    }

    #[rstest]
    fn test_cli_rejects_invalid_date() {
        assert!(Cli::try_parse_from(["overload-dashboard", "--start", "yesterday"]).is_err());
    }

    #[rstest]
    #[case(0, LevelFilter::Warn)]
    #[case(2, LevelFilter::Debug)]
    #[case(5, LevelFilter::Trace)]
    fn test_cli_log_level(#[case] verbose: u8, #[case] expected: LevelFilter) {
        let cli = Cli::try_parse_from(["overload-dashboard"]).unwrap();
        assert_eq!(Cli { verbose, ..cli }.log_level(), expected);
    }

    #[rstest]
    fn test_bundled_sample_ends_within_default_range() {
        let log = overload_domain::load(SAMPLE_DATA.as_bytes()).unwrap();
        let (_, last) = log.date_span().unwrap();
        let cli = Cli::try_parse_from(["overload-dashboard"]).unwrap();
        assert!(!exercise_counts(&log, &cli.interval(&cli.settings(), last)).is_empty());
    }
}
