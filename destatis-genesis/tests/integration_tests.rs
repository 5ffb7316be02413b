//! Integration tests against the live GENESIS web service.
//!
//! These tests need a registered account. Export `GENESIS_USERNAME` and
//! `GENESIS_PASSWORD` and run them with `cargo test -- --ignored`.

use destatis_genesis::{
    Category, Configuration, Credentials, FileFormat, GenesisClient, GenesisError, ObjectStorage,
    Selection, TableCriteria, TableOptions,
};
use std::sync::Arc;

/// Helper function to create a client for the live service
fn create_test_client() -> GenesisClient {
    let username = std::env::var("GENESIS_USERNAME").expect("GENESIS_USERNAME must be set");
    let password = std::env::var("GENESIS_PASSWORD").expect("GENESIS_PASSWORD must be set");
    let config = Configuration::new()
        .with_user_agent("destatis-genesis-test/1.0")
        .with_credentials(Credentials::new(username, password).expect("valid credentials"));
    GenesisClient::new(Arc::new(config))
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_who_am_i() {
    let client = GenesisClient::new(Arc::new(Configuration::new()));
    let who = client.hello_world().who_am_i().await.expect("whoami should succeed");
    assert!(!who.user_ip.is_empty());
}

#[tokio::test]
#[ignore = "requires GENESIS credentials"]
async fn test_login_check() {
    let client = create_test_client();
    let check = client.hello_world().login_check().await.expect("logincheck should succeed");
    assert!(check.is_successful(), "login failed: {}", check.status);
}

#[tokio::test]
#[ignore = "requires GENESIS credentials"]
async fn test_find_tables() {
    let client = create_test_client();
    let result = client
        .find()
        .find("Bevölkerung", Category::Tables, 5)
        .await
        .expect("search should succeed");
    assert!(!result.tables.is_empty(), "should find population tables");
    assert!(result.tables.len() <= 5, "should respect page length");
}

#[tokio::test]
#[ignore = "requires GENESIS credentials"]
async fn test_catalogue_tables() {
    let client = create_test_client();
    let tables = client
        .catalogue()
        .tables("12411*", ObjectStorage::All, TableCriteria::Code, 10)
        .await
        .expect("table listing should succeed");
    assert!(tables.iter().all(|t| t.code.starts_with("12411")));
}

#[tokio::test]
#[ignore = "requires GENESIS credentials"]
async fn test_table_metadata() {
    let client = create_test_client();
    let response = client
        .metadata()
        .table("12411-0001", ObjectStorage::All)
        .await
        .expect("metadata should succeed");
    assert_eq!(response.object.expect("object").code, "12411-0001");
}

#[tokio::test]
#[ignore = "requires GENESIS credentials"]
async fn test_unknown_object() {
    let client = create_test_client();
    let err = client
        .metadata()
        .table("99999-9999", ObjectStorage::All)
        .await
        .unwrap_err();
    assert!(matches!(err, GenesisError::Database { .. }), "got {err:?}");
}

#[tokio::test]
#[ignore = "requires GENESIS credentials"]
async fn test_tablefile_download() {
    let client = create_test_client();
    let response = client
        .data()
        .tablefile(
            "12411-0001",
            ObjectStorage::All,
            &Selection::new().years(2020, 2022),
            &TableOptions::default(),
            FileFormat::Csv,
        )
        .await
        .expect("download should succeed");
    let file = response.into_file().expect("a file");
    assert_eq!(file.extension(), "csv");
    assert!(!file.is_empty());
}
