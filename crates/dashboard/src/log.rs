use std::{
    collections::VecDeque,
    io::Write,
    sync::{Mutex, PoisonError},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

const CAPACITY: usize = 100;

static LOGGER: Logger = Logger {
    entries: Mutex::new(VecDeque::new()),
};

pub struct Entry {
    pub time: String,
    pub level: Level,
    pub message: String,
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:<5} {}", self.time, self.level, self.message)
    }
}

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Most recent log messages, newest first.
#[must_use]
pub fn entries() -> Vec<String> {
    LOGGER.read_entries()
}

struct Logger {
    entries: Mutex<VecDeque<Entry>>,
}

impl Logger {
    fn write_entry(&self, entry: Entry) {
        let _ = writeln!(std::io::stderr(), "{entry}");

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_front(entry);
        entries.truncate(CAPACITY);
    }

    fn read_entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write_entry(Entry {
                time: Local::now().format("%b %d %H:%M:%S").to_string(),
                level: record.level(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_entry_display() {
        assert_eq!(
            Entry {
                time: "Mar 04 18:02:44".to_string(),
                level: Level::Warn,
                message: "no data".to_string(),
            }
            .to_string(),
            "Mar 04 18:02:44 WARN  no data"
        );
    }

    #[test]
    fn test_init_twice() {
        let _ = init(LevelFilter::Warn);
        let err = init(LevelFilter::Warn).unwrap_err();
        assert!(format!("initializing logger: {err}").len() > "initializing logger: ".len());
    }

    #[test]
    fn test_logger_keeps_most_recent_entries() {
        let logger = Logger {
            entries: Mutex::new(VecDeque::new()),
        };

        for i in 0..=CAPACITY {
            logger.write_entry(Entry {
                time: String::new(),
                level: Level::Info,
                message: i.to_string(),
            });
        }

        let entries = logger.read_entries();
        assert_eq!(entries.len(), CAPACITY);
        assert_eq!(entries[0], format!(" INFO  {CAPACITY}"));
        assert_eq!(entries[CAPACITY - 1], " INFO  1");
    }
}
