use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::EnumString;

use crate::error::{KboError, Result};

pub const FIRST_SEASON: i32 = 2015;
pub const LAST_SEASON: i32 = 2025;

/// Opening day of the regular season; earlier games are exhibition games.
fn regular_season_start(year: i32) -> Option<NaiveDate> {
    let (month, day) = match year {
        2015 => (3, 28),
        2016 => (4, 1),
        2017 => (3, 31),
        2018 => (3, 24),
        2019 => (3, 23),
        2020 => (5, 5),
        2021 => (4, 3),
        2022 => (4, 2),
        2023 => (4, 1),
        2024 => (3, 23),
        2025 => (3, 22),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A supported season year together with its regular-season start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Season {
    pub year: i32,
    pub regular_season_start: NaiveDate,
}

impl Season {
    pub fn new(year: i32) -> Result<Self> {
        let regular_season_start =
            regular_season_start(year).ok_or(KboError::UnsupportedYear {
                year,
                first: FIRST_SEASON,
                last: LAST_SEASON,
            })?;
        Ok(Self {
            year,
            regular_season_start,
        })
    }
}

/// Which orientations of the standings tables to produce.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputMode {
    #[default]
    All,
    Date,
    Game,
}

impl OutputMode {
    /// Parse a mode selector, reporting unknown values as a configuration error.
    pub fn parse(value: &str) -> Result<Self> {
        OutputMode::from_str(value).map_err(|_| KboError::InvalidMode(value.to_string()))
    }

    pub fn includes_game(self) -> bool {
        matches!(self, OutputMode::All | OutputMode::Game)
    }

    pub fn includes_date(self) -> bool {
        matches!(self, OutputMode::All | OutputMode::Date)
    }
}
