use std::cmp::Ordering;

use itertools::Itertools;

use crate::model::{GameOutcome, GameRecord, GameResult, Team};

/// Running win/loss totals for every counted game of one team.
///
/// Cancelled games are dropped before numbering; draws take a game number
/// but count towards neither wins nor losses.
pub fn derive_records(team: Team, outcomes: &[GameOutcome]) -> Vec<GameRecord> {
    let mut wins = 0;
    let mut losses = 0;
    outcomes
        .iter()
        .filter(|o| o.result != GameResult::Cancelled)
        .enumerate()
        .map(|(i, outcome)| {
            match outcome.result {
                GameResult::Win => wins += 1,
                GameResult::Loss => losses += 1,
                GameResult::Draw | GameResult::Cancelled => {}
            }
            GameRecord {
                team,
                date: outcome.date,
                games: i as u32 + 1,
                wins,
                losses,
                win_rate: win_rate(wins, losses),
                margin: wins as i32 - losses as i32,
            }
        })
        .collect()
}

fn win_rate(wins: u32, losses: u32) -> f64 {
    match wins + losses {
        0 => 0.0,
        decided => f64::from(wins) / f64::from(decided),
    }
}

/// Teams ordered by the win rate of their last counted game, best first.
///
/// Equal win rates are ordered by team code.
pub fn rank_teams(records: &[GameRecord]) -> Vec<Team> {
    records
        .iter()
        .into_grouping_map_by(|r| r.team)
        .max_by_key(|_, r| r.games)
        .into_values()
        .sorted_by(|a, b| {
            b.win_rate
                .partial_cmp(&a.win_rate)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.team.code().cmp(b.team.code()))
        })
        .map(|r| r.team)
        .collect()
}
