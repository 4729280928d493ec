use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::model::{PlayerRow, RawTable, StatColumn};

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").unwrap_or_else(|_| unreachable!()));

/// Positions of the kept stat columns within one table's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    name: usize,
    kills: usize,
    deaths: usize,
    assists: usize,
    adr: usize,
    fk: usize,
    fd: usize,
}

impl ColumnLayout {
    /// Locate every kept column by its header label.
    ///
    /// Fails with [`StatsError::SchemaDrift`] naming the first column that
    /// cannot be found. Unlisted columns (rating, ACS, KAST, ...) are ignored.
    pub fn resolve(header: &[String]) -> Result<Self> {
        let find = |column: StatColumn| {
            header
                .iter()
                .position(|label| {
                    let label = label.trim().to_lowercase();
                    column.labels().contains(&label.as_str())
                })
                .ok_or_else(|| StatsError::SchemaDrift {
                    column,
                    header: header.to_vec(),
                })
        };
        Ok(Self {
            name: find(StatColumn::Name)?,
            kills: find(StatColumn::Kills)?,
            deaths: find(StatColumn::Deaths)?,
            assists: find(StatColumn::Assists)?,
            adr: find(StatColumn::Adr)?,
            fk: find(StatColumn::Fk)?,
            fd: find(StatColumn::Fd)?,
        })
    }

    fn player_row(&self, cells: &[String]) -> PlayerRow {
        let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or_default();
        PlayerRow {
            name: clean_name(cell(self.name)),
            kills: leading_token(cell(self.kills)),
            deaths: first_digit_run(cell(self.deaths)),
            assists: leading_token(cell(self.assists)),
            adr: leading_token(cell(self.adr)),
            fk: leading_token(cell(self.fk)),
            fd: leading_token(cell(self.fd)),
        }
    }
}

/// Normalize one lineup table into player rows.
///
/// Returns `Ok(None)` when the table has no data rows.
pub fn normalize_table(table: &RawTable) -> Result<Option<Vec<PlayerRow>>> {
    if table.is_empty() {
        return Ok(None);
    }
    let layout = ColumnLayout::resolve(&table.header)?;
    Ok(Some(
        table.rows.iter().map(|row| layout.player_row(row)).collect(),
    ))
}

/// Collapse the tabs and line breaks vlr.gg puts between a player and
/// their team tag into single spaces.
pub fn clean_name(raw: &str) -> String {
    raw.split_whitespace().join(" ")
}

/// The text before the first line break, i.e. the stat without its side split.
pub fn leading_token(cell: &str) -> Option<String> {
    let token = cell.split('\n').next().unwrap_or_default().trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// The first run of digits anywhere in the cell.
///
/// A run too long for `u32` is logged and read as missing.
pub fn first_digit_run(cell: &str) -> Option<u32> {
    let run = DIGIT_RUN.find(cell)?.as_str();
    match run.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(run, error = %e, "digit run out of range");
            None
        }
    }
}
