use std::collections::HashMap;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::import::StatsSink;
use crate::model::{GameCsvRow, PlayerCsvRow, PlayerStatRow};

/// A [`StatsSink`] writing to the `games`, `players`, `player_mapping` and
/// `player_stats` tables. Every batch runs in its own transaction.
pub struct PgSink {
    pool: PgPool,
}

impl PgSink {
    /// Connect with a single pooled connection; the importer never runs
    /// statements concurrently.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StatsSink for PgSink {
    #[instrument(skip_all, fields(rows = games.len()))]
    async fn insert_games(&mut self, games: &[GameCsvRow]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for game in games {
            inserted += sqlx::query(
                "INSERT INTO games (map_name, home_team, away_team, map_duration, home_score, away_score) \
                 VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT DO NOTHING",
            )
            .bind(&game.map_name)
            .bind(&game.home_team)
            .bind(&game.away_team)
            .bind(&game.map_duration)
            .bind(game.home_score)
            .bind(game.away_score)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        debug!(inserted, "committed games");
        Ok(inserted)
    }

    #[instrument(skip_all, fields(rows = players.len()))]
    async fn insert_players(&mut self, players: &[PlayerCsvRow]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for player in players {
            inserted += sqlx::query(
                "INSERT INTO players (player_name, team) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(&player.player_name)
            .bind(&player.team_abrev)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        debug!(inserted, "committed players");
        Ok(inserted)
    }

    #[instrument(skip_all)]
    async fn player_ids(&mut self) -> Result<HashMap<String, i32>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO player_mapping (player_name, player_id) \
             SELECT p.player_name, p.player_id FROM players p \
             WHERE NOT EXISTS (SELECT 1 FROM player_mapping m WHERE m.player_id = p.player_id)",
        )
        .execute(&mut *tx)
        .await?;
        let rows: Vec<(String, i32)> =
            sqlx::query_as("SELECT player_name, player_id FROM player_mapping")
                .fetch_all(&mut *tx)
                .await?;
        tx.commit().await?;
        debug!(players = rows.len(), "loaded player mapping");
        Ok(rows.into_iter().collect())
    }

    #[instrument(skip_all, fields(rows = stats.len()))]
    async fn insert_player_stats(&mut self, stats: &[PlayerStatRow]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for row in stats {
            inserted += sqlx::query(
                "INSERT INTO player_stats \
                 (player_id, game_id, kills, deaths, assists, adr, fk, fd, clutches, aces) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(row.player_id)
            .bind(row.game_id)
            .bind(row.kills)
            .bind(row.deaths)
            .bind(row.assists)
            .bind(row.adr)
            .bind(row.fk)
            .bind(row.fd)
            .bind(row.clutches)
            .bind(row.aces)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        debug!(inserted, "committed player stats");
        Ok(inserted)
    }
}
