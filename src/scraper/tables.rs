use ::scraper::{ElementRef, Selector};
use itertools::Itertools;
use tracing::debug;

use crate::error::Result;
use crate::model::{MatchTables, RawTable};
use crate::scraper::{cell_text, Html};

const OVERVIEW_TABLE: &str = "table.wf-table-inset.mod-overview";

/// Extract both lineup passes from a match overview page.
///
/// Pass one is the first overview table in every `div.vm-stats-game`; pass two
/// is the overview table that follows it in document order. Sections with no
/// table add nothing to either pass.
pub(crate) fn parse_match_tables(document: &Html) -> Result<MatchTables> {
    let game_selector = Selector::parse("div.vm-stats-game")?;
    let table_selector = Selector::parse(OVERVIEW_TABLE)?;

    let all_tables = document.select(&table_selector).collect_vec();
    let mut tables = MatchTables::default();

    for game in document.select(&game_selector) {
        let Some(first) = game.select(&table_selector).next() else {
            continue;
        };
        tables.first_pass.extend(parse_table(&first)?);

        let following = all_tables
            .iter()
            .position(|t| t.id() == first.id())
            .and_then(|i| all_tables.get(i + 1));
        if let Some(next) = following {
            tables.second_pass.extend(parse_table(next)?);
        }
    }

    debug!(
        first_pass = tables.first_pass.len(),
        second_pass = tables.second_pass.len(),
        "extracted map tables"
    );
    Ok(tables)
}

fn parse_table(table: &ElementRef) -> Result<Option<RawTable>> {
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("td, th")?;
    let rows = table
        .select(&row_selector)
        .map(|row| row.select(&cell_selector).map(|c| cell_text(&c)).collect_vec())
        .collect_vec();
    Ok(RawTable::from_rows(rows))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn player_row(name: &str, team: &str, kills: u32) -> String {
        format!(
            r#"<tr>
  <td class="mod-player"><div><a href="/player/1/{name}">
    <div class="text-of">{name}</div>
    <div class="ge-text-light">{team}</div>
  </a></div></td>
  <td class="mod-agents"></td>
  <td class="mod-stat"><span class="side mod-both">1.10</span></td>
  <td class="mod-stat"><span class="side mod-both">230</span></td>
  <td class="mod-stat mod-vlr-kills"><span class="side mod-both">{kills}</span>
<span class="side mod-t">9</span></td>
  <td class="mod-stat mod-vlr-deaths"><span class="num-sep">/</span><span class="side mod-both">12</span><span class="num-sep">/</span></td>
  <td class="mod-stat mod-vlr-assists"><span class="side mod-both">4</span>
<span class="side mod-t">2</span></td>
  <td class="mod-stat"><span class="side mod-both">+3</span></td>
  <td class="mod-stat"><span class="side mod-both">75%</span></td>
  <td class="mod-stat mod-combat"><span class="side mod-both">140</span>
<span class="side mod-t">150</span></td>
  <td class="mod-stat"><span class="side mod-both">25%</span></td>
  <td class="mod-stat mod-fb"><span class="side mod-both">2</span>
<span class="side mod-t">1</span></td>
  <td class="mod-stat mod-fd"><span class="side mod-both">1</span>
<span class="side mod-t">0</span></td>
  <td class="mod-stat"><span class="side mod-both">+1</span></td>
</tr>"#
        )
    }

    pub(crate) fn overview_table(team: &str, players: &[&str]) -> String {
        let rows = players
            .iter()
            .enumerate()
            .map(|(i, p)| player_row(p, team, 10 + i as u32))
            .join("\n");
        format!(
            r#"<table class="wf-table-inset mod-overview">
<thead><tr><th></th><th></th><th>R2.0</th><th>ACS</th><th>K</th><th>D</th><th>A</th>
<th>+/–</th><th>KAST</th><th>ADR</th><th>HS%</th><th>FK</th><th>FD</th><th>+/–</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
        )
    }

    pub(crate) fn game_section(game_id: &str, home: (&str, &[&str]), away: (&str, &[&str])) -> String {
        format!(
            r#"<div class="vm-stats-game" data-game-id="{game_id}">
<div><div>{}</div><div>{}</div></div>
</div>"#,
            overview_table(home.0, home.1),
            overview_table(away.0, away.1)
        )
    }

    pub(crate) fn match_page(sections: &[String]) -> String {
        format!(
            r#"<html><body><div class="vm-stats"><div class="vm-stats-container">{}</div></div></body></html>"#,
            sections.join("\n")
        )
    }

    #[test]
    fn test_parse_match_tables_pairs_lineups() {
        let html = match_page(&[
            game_section("1", ("SEN", &["TenZ", "zekken"]), ("G2", &["leaf", "trent"])),
            game_section("all", ("SEN", &["TenZ", "zekken"]), ("G2", &["leaf", "trent"])),
            game_section("2", ("SEN", &["Sacy"]), ("G2", &["valyn"])),
        ]);
        let document = Html::parse_document(&html);
        let tables = parse_match_tables(&document).unwrap();

        assert_eq!(tables.first_pass.len(), 3);
        assert_eq!(tables.second_pass.len(), 3);

        let first = &tables.first_pass[0];
        assert_eq!(first.header.len(), 14);
        assert_eq!(first.header[4], "K");
        assert_eq!(first.rows.len(), 2);
        assert!(first.rows[0][0].starts_with("TenZ"));
        assert!(first.rows[0][0].ends_with("SEN"));
        assert!(tables.second_pass[0].rows[0][0].starts_with("leaf"));
        assert!(tables.second_pass[2].rows[0][0].starts_with("valyn"));
    }

    #[test]
    fn test_parse_match_tables_section_without_table() {
        let html = match_page(&[
            r#"<div class="vm-stats-game" data-game-id="1"><p>No data</p></div>"#.to_string(),
            game_section("2", ("LOUD", &["Less"]), ("FUR", &["mwzera"])),
        ]);
        let document = Html::parse_document(&html);
        let tables = parse_match_tables(&document).unwrap();

        assert_eq!(tables.first_pass.len(), 1);
        assert_eq!(tables.second_pass.len(), 1);
        assert!(tables.first_pass[0].rows[0][0].starts_with("Less"));
    }

    #[test]
    fn test_parse_match_tables_follower_crosses_sections() {
        // Only one table in the first section: its follower is the next section's first table.
        let html = match_page(&[
            format!(
                r#"<div class="vm-stats-game" data-game-id="1">{}</div>"#,
                overview_table("NRG", &["s0m"])
            ),
            game_section("2", ("C9", &["OXY"]), ("EG", &["Derrek"])),
        ]);
        let document = Html::parse_document(&html);
        let tables = parse_match_tables(&document).unwrap();

        assert!(tables.second_pass[0].rows[0][0].starts_with("OXY"));
        assert!(tables.second_pass[1].rows[0][0].starts_with("Derrek"));
    }
}
