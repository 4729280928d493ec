pub(crate) mod links;
pub(crate) mod tables;

pub(crate) use ::scraper::Html;
use ::scraper::ElementRef;
use tracing::debug;

use crate::error::{Result, StatsError};

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| StatsError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StatsError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| StatsError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// All text below `element`, concatenated and trimmed at both ends.
///
/// Inner line breaks survive; the normalizer relies on them to split
/// composite stat cells.
pub(crate) fn cell_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
