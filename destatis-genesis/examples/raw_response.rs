use destatis_genesis::{Configuration, Credentials, GenesisClient, Query};
use serde_json::Value;
use std::sync::Arc;

/// Print the untyped JSON of any method, e.g. `cargo run --example raw_response -- /catalogue/terms selection=bev*`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = std::env::var("GENESIS_USERNAME")?;
    let password = std::env::var("GENESIS_PASSWORD")?;

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "/helloworld/logincheck".to_string());

    let mut query = Query::new();
    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            // keys must outlive the query
            let key: &'static str = Box::leak(key.to_string().into_boxed_str());
            query = query.set(key, value);
        }
    }

    let config = Configuration::new()
        .with_user_agent("debug-test/1.0")
        .with_credentials(Credentials::new(username, password)?);
    let client = GenesisClient::new(Arc::new(config));

    let json: Value = client.get_json(&path, query, true).await?;
    println!("Raw JSON structure:");
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}
