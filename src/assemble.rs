use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ScrapeConfig, SummaryPolicy};
use crate::dataset::Dataset;
use crate::model::{GameRecord, MapTable, MatchTables, PlayerRow, RawTable};
use crate::normalize::normalize_table;

/// Normalized lineup tables of one match, still split by extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchLineups {
    pub first_pass: Vec<Vec<PlayerRow>>,
    pub second_pass: Vec<Vec<PlayerRow>>,
}

impl MatchLineups {
    /// Normalize both passes of one match page.
    ///
    /// Empty tables are dropped before pairing, as are tables whose header
    /// no longer matches the expected stat columns.
    pub fn normalize(tables: &MatchTables) -> Self {
        Self {
            first_pass: normalize_pass(&tables.first_pass),
            second_pass: normalize_pass(&tables.second_pass),
        }
    }

    /// Stack each pass-two lineup under its pass-one partner.
    ///
    /// Maps beyond the shorter pass have no partner and are dropped.
    pub fn combine(self) -> Vec<MapTable> {
        self.first_pass
            .into_iter()
            .zip(self.second_pass)
            .map(|(mut home, away)| {
                home.extend(away);
                home
            })
            .collect()
    }
}

fn normalize_pass(tables: &[RawTable]) -> Vec<Vec<PlayerRow>> {
    tables
        .iter()
        .filter_map(|table| match normalize_table(table) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "skipping stats table");
                None
            }
        })
        .collect()
}

/// Remove the summary block vlr.gg renders as the second table of a match.
///
/// This mirrors the page layout of the event pages this was written against,
/// not a structural guarantee.
pub fn apply_summary_policy(policy: SummaryPolicy, tables: &mut Vec<MapTable>) {
    match policy {
        SummaryPolicy::DropSecond if tables.len() > 1 => {
            tables.remove(1);
        }
        SummaryPolicy::DropSecond | SummaryPolicy::KeepAll => {}
    }
}

/// The team tag a display name ends with, e.g. `LEV` for `aspas LEV`.
pub fn team_abbreviation(display_name: &str) -> &str {
    display_name.split_whitespace().last().unwrap_or_default()
}

/// Build the export dataset from every scraped match, in scrape order.
///
/// Game ids start at 0 and follow the order the map tables were produced.
pub fn assemble(matches: Vec<MatchLineups>, config: &ScrapeConfig) -> Dataset {
    let maps = matches
        .into_iter()
        .flat_map(|lineups| {
            let mut tables = lineups.combine();
            apply_summary_policy(config.summary_policy, &mut tables);
            tables
        })
        .collect_vec();

    let records = maps
        .into_iter()
        .enumerate()
        .flat_map(|(game_id, table)| {
            table
                .into_iter()
                .map(move |row| game_record(game_id as u32, row, config))
        })
        .collect_vec();

    debug!(
        records = records.len(),
        games = records.last().map(|r| r.game_id + 1).unwrap_or_default(),
        "assembled dataset"
    );
    Dataset { records }
}

fn game_record(game_id: u32, row: PlayerRow, config: &ScrapeConfig) -> GameRecord {
    let team_abrev = team_abbreviation(&row.name).to_string();
    if !config.teams.is_empty() && !config.teams.contains(&team_abrev) {
        warn!(player = %row.name, team = %team_abrev, "unknown team tag");
    }

    GameRecord {
        game_id,
        player_name: config.name_map.resolve(&row.name).to_string(),
        team_abrev,
        kills: row.kills,
        deaths: row.deaths,
        assists: row.assists,
        adr: row.adr,
        fk: row.fk,
        fd: row.fd,
    }
}
