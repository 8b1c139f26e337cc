//! Season-wide aggregation: crawl every team, derive running totals, rank the
//! teams and reshape everything into the date- and game-oriented tables.

pub mod pivot;
pub mod records;

use std::time::Duration;

use itertools::iproduct;
use tracing::{info, instrument, warn};

use crate::crawler::{PageFetcher, TeamCrawler};
use crate::error::{KboError, Result};
use crate::model::{
    GameRecord, Metric, Orientation, OutputMode, Season, SeasonTable, TableName, Team,
};
use crate::persist::TableSink;

pub use pivot::season_table;
pub use records::{derive_records, rank_teams};

/// Runs the team crawls for a season and writes the resulting tables.
pub struct SeasonAggregator<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    teams: Vec<Team>,
    delay: Duration,
}

impl<'a, F: PageFetcher + ?Sized> SeasonAggregator<'a, F> {
    pub fn new(fetcher: &'a F, teams: Vec<Team>, delay: Duration) -> Self {
        Self {
            fetcher,
            teams,
            delay,
        }
    }

    /// Produce and persist the standings tables of `year` selected by `mode`.
    ///
    /// Returns the names of the written tables (two for `date`/`game`, four
    /// for `all`). Configuration errors are returned before any page is
    /// fetched; nothing is written unless every table could be built and
    /// the sink accepted all of them.
    #[instrument(skip(self, sink))]
    pub async fn generate(
        &self,
        year: i32,
        mode: OutputMode,
        sink: &mut dyn TableSink,
    ) -> Result<Vec<TableName>> {
        let season = Season::new(year)?;

        let crawler = TeamCrawler::new(self.fetcher, self.delay);
        let mut records: Vec<GameRecord> = vec![];
        for &team in &self.teams {
            info!(team = team.display_name(), year, "crawling team schedule");
            let outcomes = crawler.crawl(team, &season).await?;
            if outcomes.is_empty() {
                warn!(team = team.display_name(), year, "no games found, skipping team");
                continue;
            }
            records.extend(derive_records(team, &outcomes));
        }
        if records.is_empty() {
            return Err(KboError::NoGames { year });
        }

        let tables = build_tables(&records, year, mode);
        info!(%mode, tables = tables.len(), "writing tables");
        sink.persist(&tables)?;
        Ok(tables.into_iter().map(|(name, _)| name).collect())
    }
}

/// Build every table `mode` asks for, sharing one column ranking.
pub fn build_tables(
    records: &[GameRecord],
    year: i32,
    mode: OutputMode,
) -> Vec<(TableName, SeasonTable)> {
    let ranking = rank_teams(records);
    let orientations = [Orientation::Game, Orientation::Date]
        .into_iter()
        .filter(|o| match o {
            Orientation::Game => mode.includes_game(),
            Orientation::Date => mode.includes_date(),
        });

    iproduct!(orientations, [Metric::WinRate, Metric::Margin])
        .map(|(orientation, metric)| {
            let name = TableName {
                metric,
                orientation,
                year,
            };
            (name, season_table(records, &ranking, orientation, metric))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::crawler::tests::{entry, FakeFetcher};
    use crate::persist::{CsvSink, MemorySink};

    fn fetcher() -> FakeFetcher {
        FakeFetcher::default()
            .page(
                Team::Lg,
                "2024",
                vec![
                    entry("20240323LGHH02024", Some("w")),
                    entry("20240324LGHH02024", Some("l")),
                    entry("20240325LGKT02024", Some("w")),
                    entry("20240326LGKT02024", None),
                ],
            )
            .page(
                Team::Hanwha,
                "2024",
                vec![
                    entry("20240323LGHH02024", Some("l")),
                    entry("20240324LGHH02024", Some("w")),
                    entry("20240325HHSS02024", Some("c")),
                    entry("20240326HHSS02024", Some("w")),
                ],
            )
            .page(
                Team::Hanwha,
                "20240326",
                vec![entry("20240326HHSS02024", Some("w"))],
            )
            .page(Team::Kt, "2024", vec![])
    }

    fn teams() -> Vec<Team> {
        vec![Team::Lg, Team::Hanwha, Team::Kt]
    }

    #[tokio::test]
    async fn test_generate_all_writes_four_tables_with_shared_columns() {
        let fetcher = fetcher();
        let aggregator = SeasonAggregator::new(&fetcher, teams(), Duration::ZERO);
        let mut sink = MemorySink::default();

        let names = aggregator
            .generate(2024, OutputMode::All, &mut sink)
            .await
            .unwrap();

        assert_eq!(names.len(), 4);
        assert_eq!(sink.tables.len(), 4);
        let stems: Vec<_> = names.iter().map(TableName::file_stem).collect();
        assert_eq!(
            stems,
            [
                "winrate_game_2024",
                "margin_game_2024",
                "winrate_date_2024",
                "margin_date_2024"
            ]
        );
        // Hanwha finishes 2-1 (.667), LG 2-1 as well; tie broken by code HH < LG.
        for (_, table) in &sink.tables {
            assert_eq!(table.columns, ["한화", "LG"]);
        }

        let (_, margin_by_date) = &sink.tables[3];
        let keys: Vec<_> = margin_by_date.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["20240323", "20240324", "20240325", "20240326"]);
        assert_eq!(margin_by_date.rows[2].cells, ["0", "1"]);
        assert_eq!(margin_by_date.rows[3].cells, ["1", "1"]);
    }

    #[tokio::test]
    async fn test_generate_single_orientation_writes_two_tables() {
        let fetcher = fetcher();
        let aggregator = SeasonAggregator::new(&fetcher, teams(), Duration::ZERO);

        let mut sink = MemorySink::default();
        let names = aggregator
            .generate(2024, OutputMode::Date, &mut sink)
            .await
            .unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.orientation == Orientation::Date));

        let mut sink = MemorySink::default();
        let names = aggregator
            .generate(2024, OutputMode::Game, &mut sink)
            .await
            .unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(sink.tables[0].1.rows.len(), 3);
    }

    #[tokio::test]
    async fn test_unsupported_year_fails_before_fetching() {
        let fetcher = fetcher();
        let aggregator = SeasonAggregator::new(&fetcher, Team::iter().collect(), Duration::ZERO);
        let mut sink = MemorySink::default();

        let err = aggregator
            .generate(2014, OutputMode::All, &mut sink)
            .await
            .unwrap_err();

        assert!(err.is_config_error());
        assert!(sink.tables.is_empty());
        assert!(fetcher.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_games_for_any_team_writes_nothing() {
        let fetcher = FakeFetcher::default()
            .page(Team::Kt, "2024", vec![])
            .page(Team::Nc, "2024", vec![entry("20240323NCLG02024", None)]);
        let aggregator = SeasonAggregator::new(&fetcher, vec![Team::Kt, Team::Nc], Duration::ZERO);
        let mut sink = MemorySink::default();

        let err = aggregator
            .generate(2024, OutputMode::All, &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, KboError::NoGames { year: 2024 }));
        assert!(sink.tables.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_without_output() {
        // Samsung has no canned page, so its first fetch fails.
        let fetcher = fetcher();
        let aggregator =
            SeasonAggregator::new(&fetcher, vec![Team::Lg, Team::Samsung], Duration::ZERO);
        let mut sink = MemorySink::default();

        let result = aggregator.generate(2024, OutputMode::All, &mut sink).await;

        assert!(result.is_err());
        assert!(sink.tables.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_leaves_no_partial_season() {
        let dir = tempfile::tempdir().unwrap();
        let season_dir = dir.path().join("2024");
        std::fs::create_dir_all(season_dir.join("winrate_date_2024.csv")).unwrap();
        let fetcher = fetcher();
        let aggregator = SeasonAggregator::new(&fetcher, teams(), Duration::ZERO);
        let mut sink = CsvSink::new(dir.path());

        let result = aggregator.generate(2024, OutputMode::All, &mut sink).await;

        assert!(result.is_err());
        let files: Vec<_> = std::fs::read_dir(&season_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, ["winrate_date_2024.csv"]);
    }
}
