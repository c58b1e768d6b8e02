use std::fmt::Write;

use chrono::{Local, SecondsFormat, Utc};
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

use crate::constants::DEFAULT_DATE_FORMAT;

pub fn parse_log_level(log_level_name: impl AsRef<str>) -> Option<LevelFilter> {
    match &log_level_name.as_ref().to_lowercase()[..] {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn set_global_log_level(log_level_name: impl AsRef<str>) {
    let log_level_filter = parse_log_level(&log_level_name).unwrap_or_else(|| {
        eprintln!(
            r#"Log level's lowercase representation isn't in \
            ["off", "error", "warn", "info", "debug", "trace"]! Using "info" for now"#
        );
        LevelFilter::Info
    });
    if let Err(error) = SimpleLogger::new().with_level(log_level_filter).init() {
        error!("The logger was already set up: {}", error);
    }
}

/// Today's date for display. Falls back to the default format if `date_format` is invalid.
pub fn today(date_format: &str) -> String {
    let now = Local::now();
    let mut date = String::new();
    if write!(date, "{}", now.format(date_format)).is_err() {
        error!(
            "Date format `{}` is invalid! Using `{}` instead",
            date_format, DEFAULT_DATE_FORMAT
        );
        date.clear();
        // The default format is known to be valid
        let _ = write!(date, "{}", now.format(DEFAULT_DATE_FORMAT));
    }
    date
}

/// The current moment as an RFC 3339 UTC timestamp with milliseconds
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
