use chrono::NaiveDate;
use overload_domain::{DEFAULT_RANGE_DAYS, Interval};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub theme: Theme,
    pub default_range_days: u64,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Settings {
    #[must_use]
    pub fn default_interval(&self, today: NaiveDate) -> Interval {
        Interval::ending_on(today, self.default_range_days)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            default_range_days: DEFAULT_RANGE_DAYS,
            chart_width: 960,
            chart_height: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_interval() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(
            Settings::default().default_interval(today),
            Interval {
                first: NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
                last: today,
            }
        );
    }

    #[rstest]
    #[case(Theme::Light, "light")]
    #[case(Theme::Dark, "dark")]
    fn test_theme_display(#[case] theme: Theme, #[case] expected: &str) {
        assert_eq!(theme.to_string(), expected);
    }
}
