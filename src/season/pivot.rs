use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{
    GameRecord, Metric, Orientation, SeasonTable, TableRow, Team, GAME_DATE_FORMAT,
};

/// Row key of a pivot, ordered the way rows are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RowKey {
    Game(u32),
    Date(NaiveDate),
}

impl RowKey {
    fn of(record: &GameRecord, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Game => RowKey::Game(record.games),
            Orientation::Date => RowKey::Date(record.date),
        }
    }

    fn label(&self) -> String {
        match self {
            RowKey::Game(games) => games.to_string(),
            RowKey::Date(date) => date.format(GAME_DATE_FORMAT).to_string(),
        }
    }
}

/// Sparse numeric table: one row per key, one column per ranked team.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub columns: Vec<Team>,
    pub rows: BTreeMap<RowKey, Vec<Option<f64>>>,
}

impl Pivot {
    /// Pivot `records` on `orientation`, keeping only the teams in `columns`.
    ///
    /// When several records land in the same cell (double-headers in the
    /// date orientation) the last one in input order wins.
    pub fn build(
        records: &[GameRecord],
        columns: &[Team],
        orientation: Orientation,
        metric: Metric,
    ) -> Self {
        let mut rows: BTreeMap<RowKey, Vec<Option<f64>>> = BTreeMap::new();
        for record in records {
            let Some(col) = columns.iter().position(|t| *t == record.team) else {
                continue;
            };
            let value = match metric {
                Metric::WinRate => record.win_rate,
                Metric::Margin => f64::from(record.margin),
            };
            rows.entry(RowKey::of(record, orientation))
                .or_insert_with(|| vec![None; columns.len()])[col] = Some(value);
        }
        Self {
            columns: columns.to_vec(),
            rows,
        }
    }

    /// Fill each missing cell from the nearest earlier row of the same column.
    /// Leading gaps stay empty.
    pub fn forward_fill(&mut self) {
        let mut last = vec![None; self.columns.len()];
        for cells in self.rows.values_mut() {
            for (cell, last) in cells.iter_mut().zip(last.iter_mut()) {
                if cell.is_some() {
                    *last = *cell;
                } else {
                    *cell = *last;
                }
            }
        }
    }

    pub fn into_table(self, orientation: Orientation, metric: Metric) -> SeasonTable {
        SeasonTable {
            index_name: orientation.index_name().to_string(),
            columns: self
                .columns
                .iter()
                .map(|t| t.display_name().to_string())
                .collect(),
            rows: self
                .rows
                .into_iter()
                .map(|(key, cells)| TableRow {
                    key: key.label(),
                    cells: cells.into_iter().map(|v| metric.format_cell(v)).collect(),
                })
                .collect(),
        }
    }
}

/// Build one finished table: pivot, forward-fill, format.
pub fn season_table(
    records: &[GameRecord],
    ranking: &[Team],
    orientation: Orientation,
    metric: Metric,
) -> SeasonTable {
    let mut pivot = Pivot::build(records, ranking, orientation, metric);
    pivot.forward_fill();
    pivot.into_table(orientation, metric)
}
