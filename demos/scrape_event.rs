use std::fs::File;

use vlr_stats_loader::{ScrapeConfig, StatsClient};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> vlr_stats_loader::Result<()> {
    init_tracing();

    let config = match std::env::var("VLR_EVENT_CONFIG") {
        Ok(path) => ScrapeConfig::load(path)?,
        Err(_) => ScrapeConfig::default(),
    };
    println!("Scraping {}", config.matches_url);

    let client = StatsClient::new(config);
    let dataset = client.scrape_event().await;
    println!(
        "Found {} games, {} player rows\n",
        dataset.games(),
        dataset.len()
    );
    println!("{}", dataset.preview(10));

    std::fs::create_dir_all("Data")?;
    dataset.write_csv(File::create("Data/scraped_stats.csv")?)?;
    dataset.write_players_csv(File::create("Data/player_data.csv")?)?;
    Ok(())
}
