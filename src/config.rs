use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DATE_FORMAT;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The file that plays the part of the browser's local storage
    pub storage_path: PathBuf,
    pub log_level: String,
    /// `chrono` format of the dates shown under comments
    pub date_format: String,
    /// Where the article detail page lives
    pub detail_page: String,
    pub autoplay_interval_in_milliseconds: u64,
    pub comment_submit_delay_in_milliseconds: u64,
    pub contact_submit_delay_in_milliseconds: u64,
}

impl Config {
    /// Returns a sample configuration with the values the site was designed with
    pub fn sample() -> Self {
        Self {
            storage_path: "storage.json".into(),
            log_level: "info".into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            detail_page: "blog.html".into(),
            autoplay_interval_in_milliseconds: 5000,
            comment_submit_delay_in_milliseconds: 500,
            contact_submit_delay_in_milliseconds: 1000,
        }
    }

    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_in_milliseconds)
    }

    pub const fn comment_submit_delay(&self) -> Duration {
        Duration::from_millis(self.comment_submit_delay_in_milliseconds)
    }

    pub const fn contact_submit_delay(&self) -> Duration {
        Duration::from_millis(self.contact_submit_delay_in_milliseconds)
    }
}
