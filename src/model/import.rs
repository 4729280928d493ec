use serde::{Deserialize, Serialize};

/// A row of `scores_data.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCsvRow {
    pub map_name: String,
    pub home_team: String,
    pub away_team: String,
    pub map_duration: String,
    pub home_score: i32,
    pub away_score: i32,
    /// Present in some exports; the store assigns its own id.
    #[serde(default)]
    pub game_id: Option<f64>,
}

/// A row of `player_data.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCsvRow {
    pub player_name: String,
    pub team_abrev: String,
}

/// A row of `all_stats.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCsvRow {
    pub player_name: String,
    pub game_id: f64,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub adr: f64,
    pub fk: f64,
    pub fd: f64,
    pub clutches: i32,
    pub aces: i32,
}

/// A `player_stats` row with its player name already resolved to an id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatRow {
    pub player_id: i32,
    pub game_id: i32,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub adr: f64,
    pub fk: f64,
    pub fd: f64,
    pub clutches: i32,
    pub aces: i32,
}

impl PlayerStatRow {
    pub fn resolve(player_id: i32, row: &StatCsvRow) -> Self {
        Self {
            player_id,
            game_id: row.game_id as i32,
            kills: row.kills,
            deaths: row.deaths,
            assists: row.assists,
            adr: row.adr,
            fk: row.fk,
            fd: row.fd,
            clutches: row.clutches,
            aces: row.aces,
        }
    }
}

/// Outcome of importing one CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub file: String,
    pub read: usize,
    pub inserted: u64,
    pub unmatched: Vec<String>,
}

impl ImportReport {
    pub fn skipped(&self) -> usize {
        self.unmatched.len()
    }
}
