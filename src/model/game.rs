use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::EnumString;

/// Format of the date prefix embedded in game identifiers and date tokens.
pub const GAME_DATE_FORMAT: &str = "%Y%m%d";

/// Result of a finished (or called-off) game, as marked on the schedule page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display)]
pub enum GameResult {
    #[strum(serialize = "w")]
    Win,
    #[strum(serialize = "l")]
    Loss,
    #[strum(serialize = "d")]
    Draw,
    #[strum(serialize = "c")]
    Cancelled,
}

/// One game recorded by the crawler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub date: NaiveDate,
    pub result: GameResult,
}

/// A single game entry as listed on a schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Unique game identifier, e.g. `20240421WOKT02024`.
    pub game_id: String,
    /// `None` when the game has not been played yet.
    pub result: Option<GameResult>,
}

impl ScheduleEntry {
    /// Date encoded in the first eight characters of the game identifier.
    ///
    /// Returns `None` for identifiers that do not start with a valid date.
    pub fn date(&self) -> Option<NaiveDate> {
        let prefix = self.game_id.get(..8)?;
        NaiveDate::parse_from_str(prefix, GAME_DATE_FORMAT).ok()
    }
}

/// Key of the crawl worklist: the season seed or a date discovered while paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateToken {
    Year(i32),
    Date(NaiveDate),
}

impl Display for DateToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DateToken::Year(year) => write!(f, "{year}"),
            DateToken::Date(date) => write!(f, "{}", date.format(GAME_DATE_FORMAT)),
        }
    }
}
