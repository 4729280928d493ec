use vlr_stats_loader::{ImportSettings, Importer, PgSink};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> vlr_stats_loader::Result<()> {
    init_tracing();

    let settings = ImportSettings::from_env()?;
    let sink = PgSink::connect(&settings.database_url).await?;
    let mut importer = Importer::new(sink);

    for report in importer.run(&settings).await? {
        println!(
            "{}: read {}, inserted {}, skipped {}",
            report.file,
            report.read,
            report.inserted,
            report.skipped()
        );
        for name in &report.unmatched {
            println!("  Player '{name}' not found in player_mapping");
        }
    }
    Ok(())
}
