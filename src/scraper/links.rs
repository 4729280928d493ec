use ::scraper::Selector;
use itertools::Itertools;
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::error::{Result, StatsError};
use crate::model::MatchUrl;
use crate::scraper::Html;

/// Collect every match link from an event's matches tab.
///
/// The first card in the column is the date/filter header, not a match.
pub(crate) fn parse_match_urls(document: &Html, config: &ScrapeConfig) -> Result<Vec<MatchUrl>> {
    let container_selector = Selector::parse("body div.col-container")?;
    let container = document
        .select(&container_selector)
        .next()
        .ok_or(StatsError::ElementNotFound {
            context: "matches column (div.col-container)",
        })?;

    let card_selector = Selector::parse("div.wf-card")?;
    let link_selector = Selector::parse("a")?;

    let urls = container
        .select(&card_selector)
        .skip(1)
        .flat_map(|card| card.select(&link_selector).collect_vec())
        .filter_map(|a| a.value().attr("href"))
        .map(|href| match_url(config, href))
        .collect_vec();

    debug!(count = urls.len(), "collected match urls");
    Ok(urls)
}

fn match_url(config: &ScrapeConfig, href: &str) -> MatchUrl {
    let url = format!("{}{href}", config.base_url);
    MatchUrl {
        overview: format!("{url}{}", config.overview_suffix),
        performance: format!("{url}{}", config.performance_suffix),
        url,
    }
}
