use destatis_genesis::{Category, Configuration, Credentials, GenesisClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = std::env::var("GENESIS_USERNAME")?;
    let password = std::env::var("GENESIS_PASSWORD")?;
    let term = std::env::args().nth(1).unwrap_or_else(|| "Bevölkerung".to_string());

    let config = Configuration::new()
        .with_user_agent("debug-search/1.0")
        .with_credentials(Credentials::new(username, password)?);
    let client = GenesisClient::new(Arc::new(config));

    println!("Searching for '{}'...", term);

    match client.find().find(&term, Category::All, 5).await {
        Ok(result) => {
            println!("Success! {} hits", result.total());
            println!("Status: {} ({})", result.status.content, result.status.code);

            if let Some(first) = result.tables.first() {
                println!("First table: {} - {}", first.code, first.content);
            }
            if let Some(first) = result.statistics.first() {
                println!("First statistic: {} - {}", first.code, first.content);
            }
        }
        Err(e) => {
            println!("Error: {}", e);
        }
    }

    Ok(())
}
