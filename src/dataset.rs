use std::io;

use itertools::Itertools;
use serde::Serialize;

use crate::error::Result;
use crate::model::{GameRecord, PlayerCsvRow};

const PREVIEW_HEADER: [&str; 9] = [
    "game_id",
    "player_name",
    "team_abrev",
    "kills",
    "deaths",
    "assists",
    "adr",
    "fk",
    "fd",
];

/// The assembled per-player, per-map statistics of one scrape run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub records: Vec<GameRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct game ids.
    pub fn games(&self) -> usize {
        self.records.iter().map(|r| r.game_id).unique().count()
    }

    /// Distinct players with their team tag, in first-seen order.
    pub fn players(&self) -> Vec<PlayerCsvRow> {
        self.records
            .iter()
            .map(|r| PlayerCsvRow {
                player_name: r.player_name.clone(),
                team_abrev: r.team_abrev.clone(),
            })
            .unique()
            .collect()
    }

    /// Write the records as CSV with a header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the distinct players in the `player_data.csv` layout.
    pub fn write_players_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for player in self.players() {
            writer.serialize(player)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read records back from CSV written by [`Dataset::write_csv`].
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self> {
        let records: Vec<GameRecord> = csv::Reader::from_reader(reader)
            .deserialize()
            .collect::<std::result::Result<_, csv::Error>>()?;
        Ok(Self { records })
    }

    /// The last `rows` records as a column-aligned text table.
    pub fn preview(&self, rows: usize) -> String {
        let start = self.records.len().saturating_sub(rows);
        let lines = std::iter::once(PREVIEW_HEADER.map(String::from))
            .chain(self.records[start..].iter().map(preview_cells))
            .collect_vec();

        let widths = (0..PREVIEW_HEADER.len())
            .map(|col| lines.iter().map(|l| l[col].chars().count()).max().unwrap_or(0))
            .collect_vec();

        lines
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &width)| format!("{cell:<width$}"))
                    .join("  ")
                    .trim_end()
                    .to_string()
            })
            .join("\n")
    }
}

fn preview_cells(record: &GameRecord) -> [String; 9] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        record.game_id.to_string(),
        record.player_name.clone(),
        record.team_abrev.clone(),
        text(&record.kills),
        record.deaths.map(|d| d.to_string()).unwrap_or_default(),
        text(&record.assists),
        text(&record.adr),
        text(&record.fk),
        text(&record.fd),
    ]
}
