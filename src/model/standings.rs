use chrono::NaiveDate;
use serde::Serialize;

use super::Team;

/// Running totals for one team after one counted (non-cancelled) game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub team: Team,
    pub date: NaiveDate,
    /// 1-based number of counted games so far.
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub margin: i32,
}

/// Value plotted in a standings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    WinRate,
    Margin,
}

impl Metric {
    /// Render a (possibly forward-filled) cell value.
    pub fn format_cell(self, value: Option<f64>) -> String {
        match (self, value) {
            (Metric::WinRate, Some(v)) => format!("{v:.3}"),
            (Metric::WinRate, None) => String::new(),
            (Metric::Margin, Some(v)) => format!("{}", v as i64),
            (Metric::Margin, None) => "0".to_string(),
        }
    }
}

/// Row key of a standings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// One row per counted game number.
    Game,
    /// One row per calendar date with at least one counted game.
    Date,
}

impl Orientation {
    /// Header of the row-key column.
    pub fn index_name(self) -> &'static str {
        match self {
            Orientation::Game => "games",
            Orientation::Date => "date",
        }
    }
}

/// Identifies one output table of a season run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TableName {
    pub metric: Metric,
    pub orientation: Orientation,
    pub year: i32,
}

impl TableName {
    /// File stem, e.g. `winrate_game_2024`.
    pub fn file_stem(&self) -> String {
        format!("{}_{}_{}", self.metric, self.orientation, self.year)
    }
}

/// A pivoted, ranked, forward-filled and formatted standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonTable {
    pub index_name: String,
    /// Team display names, best final win rate first.
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub key: String,
    pub cells: Vec<String>,
}

impl SeasonTable {
    pub fn header(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.index_name.as_str()).chain(self.columns.iter().map(String::as_str))
    }
}
