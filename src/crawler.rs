use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::error::Result;
use crate::model::{DateToken, GameOutcome, ScheduleEntry, Season, Team};

/// Source of schedule pages, one round trip per call.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the schedule page of `team` anchored at `token`, entries in page order.
    async fn fetch_schedule(&self, team: Team, token: &DateToken) -> Result<Vec<ScheduleEntry>>;
}

/// Why a page scan ended before its last entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An entry from another year (or with a reformatted identifier) was reached.
    SeasonBoundary,
    /// An entry without a result was reached; it and everything after it are unplayed.
    Unplayed,
}

/// Result of scanning one schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScan {
    /// Every entry was examined. `last_date` is the date of the final entry, if any.
    Exhausted {
        outcomes: Vec<(String, GameOutcome)>,
        last_date: Option<NaiveDate>,
    },
    /// The scan stopped early; the page's trailing date must not be queued.
    Stopped {
        outcomes: Vec<(String, GameOutcome)>,
        reason: StopReason,
    },
}

/// Scan one page's entries in order, skipping exhibition games and already
/// seen identifiers, stopping at the season boundary or the first unplayed game.
pub fn scan_page(entries: &[ScheduleEntry], season: &Season, seen: &HashSet<String>) -> PageScan {
    let mut outcomes = vec![];
    let mut on_page = HashSet::new();
    let mut last_date = None;
    for entry in entries {
        let Some(date) = entry.date().filter(|d| d.year() == season.year) else {
            return PageScan::Stopped {
                outcomes,
                reason: StopReason::SeasonBoundary,
            };
        };
        last_date = Some(date);
        if date < season.regular_season_start {
            continue;
        }
        if seen.contains(&entry.game_id) || on_page.contains(entry.game_id.as_str()) {
            continue;
        }
        let Some(result) = entry.result else {
            return PageScan::Stopped {
                outcomes,
                reason: StopReason::Unplayed,
            };
        };
        on_page.insert(entry.game_id.as_str());
        outcomes.push((entry.game_id.clone(), GameOutcome { date, result }));
    }
    PageScan::Exhausted {
        outcomes,
        last_date,
    }
}

/// Discovers every played regular-season game of one team by paging through
/// its schedule with a worklist of date tokens.
pub struct TeamCrawler<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    delay: Duration,
}

impl<'a, F: PageFetcher + ?Sized> TeamCrawler<'a, F> {
    pub fn new(fetcher: &'a F, delay: Duration) -> Self {
        Self { fetcher, delay }
    }

    /// Crawl `team`'s season and return its outcomes sorted by date.
    ///
    /// A fetch or parse failure aborts the crawl. A team with no games yields
    /// an empty list.
    #[instrument(skip(self, season), fields(year = season.year))]
    pub async fn crawl(&self, team: Team, season: &Season) -> Result<Vec<GameOutcome>> {
        let mut worklist = VecDeque::from([DateToken::Year(season.year)]);
        let mut consumed = HashSet::new();
        let mut seen = HashSet::new();
        let mut outcomes = vec![];

        while let Some(token) = worklist.pop_front() {
            if !consumed.insert(token) {
                continue;
            }

            let entries = self.fetcher.fetch_schedule(team, &token).await?;
            match scan_page(&entries, season, &seen) {
                PageScan::Exhausted {
                    outcomes: found,
                    last_date,
                } => {
                    trace!(%token, found = found.len(), "page exhausted");
                    record(&mut outcomes, &mut seen, found);
                    if let Some(next) = last_date.map(DateToken::Date) {
                        if !consumed.contains(&next) {
                            worklist.push_back(next);
                        }
                    }
                }
                PageScan::Stopped {
                    outcomes: found,
                    reason,
                } => {
                    trace!(%token, found = found.len(), ?reason, "page stopped");
                    record(&mut outcomes, &mut seen, found);
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        debug!(
            %team,
            pages = consumed.len(),
            games = outcomes.len(),
            "crawl finished"
        );
        Ok(outcomes
            .into_iter()
            .sorted_by_key(|o: &GameOutcome| o.date)
            .collect())
    }
}

fn record(
    outcomes: &mut Vec<GameOutcome>,
    seen: &mut HashSet<String>,
    found: Vec<(String, GameOutcome)>,
) {
    for (game_id, outcome) in found {
        seen.insert(game_id);
        outcomes.push(outcome);
    }
}
