use std::path::PathBuf;
use std::time::Duration;

use strum::IntoEnumIterator;

use crate::kbo_scraper::BASE_URL;
use crate::model::{OutputMode, Team};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/98.0.4758.102 Safari/537.36";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub year: i32,
    pub mode: OutputMode,
    pub output_dir: PathBuf,
    /// Pause after every page fetch.
    pub request_delay: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub base_url: String,
    pub teams: Vec<Team>,
}

impl Config {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            mode: OutputMode::default(),
            output_dir: PathBuf::from("data"),
            request_delay: DEFAULT_DELAY,
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: BASE_URL.to_string(),
            teams: Team::iter().collect(),
        }
    }
}
