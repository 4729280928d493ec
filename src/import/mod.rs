pub mod postgres;
pub mod sources;

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::config::ImportSettings;
use crate::error::Result;
use crate::model::{GameCsvRow, ImportReport, PlayerCsvRow, PlayerStatRow, StatCsvRow};

pub use postgres::PgSink;

/// Destination for imported rows.
///
/// Each method receives one whole source file and must apply it atomically.
#[allow(async_fn_in_trait)]
pub trait StatsSink {
    /// Insert games, ignoring rows that conflict with existing ones.
    async fn insert_games(&mut self, games: &[GameCsvRow]) -> Result<u64>;

    /// Insert players, ignoring rows that conflict with existing ones.
    async fn insert_players(&mut self, players: &[PlayerCsvRow]) -> Result<u64>;

    /// Player name → player id for every known player.
    async fn player_ids(&mut self) -> Result<HashMap<String, i32>>;

    async fn insert_player_stats(&mut self, stats: &[PlayerStatRow]) -> Result<u64>;
}

/// Loads the three CSV extracts into a [`StatsSink`].
pub struct Importer<S> {
    sink: S,
}

impl<S: StatsSink> Importer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Import games, then players, then player stats from `settings.data_dir`.
    ///
    /// Players must land before stats so their names resolve.
    #[instrument(skip_all, fields(data_dir = %settings.data_dir.display()))]
    pub async fn run(&mut self, settings: &ImportSettings) -> Result<Vec<ImportReport>> {
        let games: Vec<GameCsvRow> = sources::read_file(&settings.games_csv())?;
        let games = self.import_games(&file_name(&settings.games_csv()), &games).await?;

        let players: Vec<PlayerCsvRow> = sources::read_file(&settings.players_csv())?;
        let players = self
            .import_players(&file_name(&settings.players_csv()), &players)
            .await?;

        let stats: Vec<StatCsvRow> = sources::read_file(&settings.stats_csv())?;
        let stats = self.import_stats(&file_name(&settings.stats_csv()), &stats).await?;

        Ok(vec![games, players, stats])
    }

    pub async fn import_games(&mut self, file: &str, rows: &[GameCsvRow]) -> Result<ImportReport> {
        let inserted = self.sink.insert_games(rows).await?;
        info!(file, read = rows.len(), inserted, "imported games");
        Ok(ImportReport {
            file: file.to_string(),
            read: rows.len(),
            inserted,
            unmatched: vec![],
        })
    }

    pub async fn import_players(
        &mut self,
        file: &str,
        rows: &[PlayerCsvRow],
    ) -> Result<ImportReport> {
        let inserted = self.sink.insert_players(rows).await?;
        info!(file, read = rows.len(), inserted, "imported players");
        Ok(ImportReport {
            file: file.to_string(),
            read: rows.len(),
            inserted,
            unmatched: vec![],
        })
    }

    /// Resolve each row's player name and insert the ones that resolve.
    ///
    /// Rows naming an unknown player are logged and left out of the insert.
    pub async fn import_stats(&mut self, file: &str, rows: &[StatCsvRow]) -> Result<ImportReport> {
        let ids = self.sink.player_ids().await?;

        let mut resolved = Vec::with_capacity(rows.len());
        let mut unmatched = vec![];
        for row in rows {
            match ids.get(&row.player_name) {
                Some(&player_id) => resolved.push(PlayerStatRow::resolve(player_id, row)),
                None => {
                    warn!(player = %row.player_name, "player not found in player_mapping");
                    unmatched.push(row.player_name.clone());
                }
            }
        }

        let inserted = self.sink.insert_player_stats(&resolved).await?;
        info!(
            file,
            read = rows.len(),
            inserted,
            skipped = unmatched.len(),
            "imported player stats"
        );
        Ok(ImportReport {
            file: file.to_string(),
            read: rows.len(),
            inserted,
            unmatched,
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
