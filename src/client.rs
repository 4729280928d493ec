use tracing::{info, instrument, warn};

use crate::assemble::{assemble, MatchLineups};
use crate::config::ScrapeConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::{MatchTables, MatchUrl};
use crate::scraper;

/// Scrapes one vlr.gg event into a [`Dataset`].
///
/// `StatsClient` wraps a [`reqwest::Client`] together with the
/// [`ScrapeConfig`] describing the event, its rosters and name fixes.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> vlr_stats_loader::Result<()> {
/// use vlr_stats_loader::{ScrapeConfig, StatsClient};
///
/// let client = StatsClient::new(ScrapeConfig::default());
/// let dataset = client.scrape_event().await;
/// println!("{}", dataset.preview(10));
/// # Ok(())
/// # }
/// ```
pub struct StatsClient {
    http: reqwest::Client,
    config: ScrapeConfig,
}

impl StatsClient {
    /// Create a new client with default HTTP settings.
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: ScrapeConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    /// Fetch the event's matches tab and collect every match link on it.
    #[instrument(skip(self), fields(url = %self.config.matches_url))]
    pub async fn get_match_urls(&self) -> Result<Vec<MatchUrl>> {
        let document = scraper::get_document(&self.http, &self.config.matches_url).await?;
        scraper::links::parse_match_urls(&document, &self.config)
    }

    /// Fetch one match page and extract both lineup passes from it.
    #[instrument(skip(self))]
    pub async fn get_match_tables(&self, url: &str) -> Result<MatchTables> {
        let document = scraper::get_document(&self.http, url).await?;
        scraper::tables::parse_match_tables(&document)
    }

    /// Run the whole scrape: links, every match overview, then assembly.
    ///
    /// A listing page that cannot be fetched or parsed yields an empty
    /// dataset; a match page that fails is skipped.
    #[instrument(skip(self))]
    pub async fn scrape_event(&self) -> Dataset {
        let urls = match self.get_match_urls().await {
            Ok(urls) => urls,
            Err(e) => {
                warn!(error = %e, "could not collect match urls");
                vec![]
            }
        };
        info!(count = urls.len(), "found matches");

        let mut matches = Vec::with_capacity(urls.len());
        for url in &urls {
            match self.get_match_tables(&url.overview).await {
                Ok(tables) => matches.push(MatchLineups::normalize(&tables)),
                Err(e) => warn!(url = %url.overview, error = %e, "skipping match page"),
            }
        }

        let dataset = assemble(matches, &self.config);
        info!(
            records = dataset.len(),
            games = dataset.games(),
            "scraped event"
        );
        dataset
    }
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new(ScrapeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    use super::*;
    use crate::scraper::tables::tests::{game_section, match_page};
    use crate::scraper::Html;

    /// Serve canned `(path prefix, status, body)` pages on a local port and
    /// return its base URL. Unknown paths get a 404.
    fn serve(pages: Vec<(&'static str, u16, String)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut header = String::new();
                while reader.read_line(&mut header).unwrap_or(0) > 2 {
                    header.clear();
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = pages
                    .iter()
                    .find(|(prefix, ..)| path.starts_with(prefix))
                    .map(|(_, status, body)| (*status, body.as_str()))
                    .unwrap_or((404, ""));
                write!(
                    stream,
                    "HTTP/1.1 {status} Status\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                )
                .unwrap();
            }
        });

        base_url
    }

    fn local_client(base_url: &str) -> StatsClient {
        let config = ScrapeConfig {
            base_url: base_url.to_string(),
            matches_url: format!("{base_url}/listing"),
            ..ScrapeConfig::default()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        StatsClient::with_client(http, config)
    }

    fn listing(hrefs: &[&str]) -> String {
        let links = hrefs
            .iter()
            .map(|href| format!(r#"<a class="match-item" href="{href}">match</a>"#))
            .collect::<String>();
        format!(
            r#"<html><body><div class="col-container">
<div class="wf-card"><a href="/listing?series_id=all">All Stages</a></div>
<div class="wf-card">{links}</div>
</div></body></html>"#
        )
    }

    fn lineups_from_page(html: &str) -> MatchLineups {
        let document = Html::parse_document(html);
        let tables = scraper::tables::parse_match_tables(&document).unwrap();
        MatchLineups::normalize(&tables)
    }

    #[test]
    fn test_pages_to_dataset() {
        let first = match_page(&[
            game_section("1", ("LEV", &["aspas", "C0M"]), ("KRÜ", &["heat", "Klaus"])),
            game_section("all", ("LEV", &["aspas", "C0M"]), ("KRÜ", &["heat", "Klaus"])),
            game_section("2", ("LEV", &["aspas", "C0M"]), ("KRÜ", &["heat", "Klaus"])),
        ]);
        let second = match_page(&[
            game_section("1", ("NRG", &["s0m"]), ("100T", &["Asuna"])),
            game_section("all", ("NRG", &["s0m"]), ("100T", &["Asuna"])),
            game_section("2", ("NRG", &["s0m"]), ("100T", &["Asuna"])),
        ]);

        let dataset = assemble(
            vec![lineups_from_page(&first), lineups_from_page(&second)],
            &ScrapeConfig::default(),
        );

        let ids = dataset.records.iter().map(|r| r.game_id).collect::<Vec<_>>();
        assert_eq!(ids, [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 3, 3]);

        let aspas = &dataset.records[0];
        assert_eq!(aspas.player_name, "aspas");
        assert_eq!(aspas.team_abrev, "LEV");
        assert_eq!(aspas.kills.as_deref(), Some("10"));
        assert_eq!(aspas.deaths, Some(12));
        assert_eq!(aspas.assists.as_deref(), Some("4"));
        assert_eq!(aspas.adr.as_deref(), Some("140"));
        assert_eq!(aspas.fk.as_deref(), Some("2"));
        assert_eq!(aspas.fd.as_deref(), Some("1"));

        assert_eq!(dataset.records[2].player_name, "heat");
        assert_eq!(dataset.records[2].team_abrev, "KRÜ");
        assert_eq!(dataset.records[11].player_name, "Asuna");
        assert_eq!(dataset.records[11].team_abrev, "100T");
    }

    #[tokio::test]
    async fn test_scrape_event_skips_failing_match_page() {
        let good = match_page(&[game_section(
            "1",
            ("LEV", &["aspas"]),
            ("KRÜ", &["heat"]),
        )]);
        let base_url = serve(vec![
            ("/listing", 200, listing(&["/bad", "/good"])),
            ("/bad", 500, "internal error".to_string()),
            ("/good", 200, good),
        ]);

        let dataset = local_client(&base_url).scrape_event().await;

        let names = dataset
            .records
            .iter()
            .map(|r| r.player_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["aspas", "heat"]);
        assert!(dataset.records.iter().all(|r| r.game_id == 0));
    }

    #[tokio::test]
    async fn test_scrape_event_listing_without_matches_column_is_empty() {
        let base_url = serve(vec![(
            "/listing",
            200,
            "<html><body><div class=\"wf-card\"></div></body></html>".to_string(),
        )]);

        let dataset = local_client(&base_url).scrape_event().await;
        assert!(dataset.is_empty());
        assert_eq!(dataset.games(), 0);
    }

    #[tokio::test]
    #[ignore = "hits vlr.gg"]
    async fn test_scrape_event_live() {
        let client = StatsClient::default();

        let urls = client.get_match_urls().await.unwrap();
        assert!(!urls.is_empty());

        let tables = client.get_match_tables(&urls[0].overview).await.unwrap();
        assert!(!tables.first_pass.is_empty());
    }
}
