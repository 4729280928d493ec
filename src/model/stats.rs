use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The stat columns kept from a vlr.gg overview table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StatColumn {
    Name,
    Kills,
    Deaths,
    Assists,
    Adr,
    Fk,
    Fd,
}

impl StatColumn {
    /// Header labels (compared case-insensitively) that identify this column.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            StatColumn::Name => &["", "player"],
            StatColumn::Kills => &["k", "kills"],
            StatColumn::Deaths => &["d", "deaths"],
            StatColumn::Assists => &["a", "assists"],
            StatColumn::Adr => &["adr"],
            StatColumn::Fk => &["fk"],
            StatColumn::Fd => &["fd"],
        }
    }
}

/// One player's line in one lineup table after normalization.
///
/// Composite cells keep their leading token as text; `deaths` is the first
/// digit run of its cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerRow {
    pub name: String,
    pub kills: Option<String>,
    pub deaths: Option<u32>,
    pub assists: Option<String>,
    pub adr: Option<String>,
    pub fk: Option<String>,
    pub fd: Option<String>,
}

/// Both lineups of one map, pass-one rows first.
pub type MapTable = Vec<PlayerRow>;

/// A finished per-player, per-map row in export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: u32,
    pub player_name: String,
    pub team_abrev: String,
    pub kills: Option<String>,
    pub deaths: Option<u32>,
    pub assists: Option<String>,
    pub adr: Option<String>,
    pub fk: Option<String>,
    pub fd: Option<String>,
}
