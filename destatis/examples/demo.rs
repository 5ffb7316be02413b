use destatis::genesis::{Category, FileFormat, Selection};
use destatis::{DestatisClient, DestatisConfig};
use std::error::Error;

/// Search, inspect and download a table.
///
/// Needs `GENESIS_USERNAME` and `GENESIS_PASSWORD` in the environment.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    println!("DESTATIS GENESIS Rust Client Demo");
    println!("=================================\n");

    let config = DestatisConfig::from_env()?.with_download_dir("./demo-downloads");
    let client = DestatisClient::with_config(config)?;

    let who = client.who_am_i().await?;
    println!("Connected from {} as {}\n", who.user_ip, who.user_agent);

    // 1. Full-text search
    println!("Searching for 'Bevölkerung' tables...");
    let hits = client.search("Bevölkerung", Category::Tables, 5).await?;
    for (i, table) in hits.tables.iter().enumerate() {
        println!("{}. {} {}", i + 1, table.code, table.content);
    }

    let Some(first) = hits.tables.first() else {
        println!("No tables found");
        return Ok(());
    };

    // 2. Metadata of the first hit
    println!("\nMetadata of {}:", first.code);
    let metadata = client.table_info(&first.code).await?;
    println!("  {}", metadata.content);
    if let Some(updated) = metadata.updated {
        println!("  updated {}", updated);
    }

    // 3. Download the last few years as CSV
    client.validate_download_dir().await?;
    let path = client
        .download_table(&first.code, &Selection::new().years(2018, 2022), FileFormat::Csv)
        .await?;
    println!("\nSaved to {}", path.display());

    Ok(())
}
