//! Facade tests against a local mock of the GENESIS web service.

use destatis::genesis::{
    Category, ChartOptions, ChartType, Credentials, FileFormat, Language, MapOptions, Selection,
};
use destatis::{ChartSource, DestatisClient, DestatisConfig, DestatisError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, download_dir: &std::path::Path) -> DestatisClient {
    let config = DestatisConfig::new()
        .with_base_url(server.uri())
        .unwrap()
        .with_credentials(Credentials::new("ABCDEFGHIJ", "0123456789").unwrap())
        .with_language(Language::English)
        .with_user_agent("destatis-tests/1.0")
        .with_download_dir(download_dir)
        .with_progress(false);
    DestatisClient::with_config(config).unwrap()
}

fn status_ok() -> serde_json::Value {
    json!({"Code": 0, "Content": "successful", "Type": "Information"})
}

#[tokio::test]
async fn search_uses_configured_language_and_agent() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/find/find"))
        .and(query_param("term", "population"))
        .and(query_param("category", "tables"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Ident": {"Service": "find", "Method": "find"},
            "Status": status_ok(),
            "Tables": [{"Code": "12411-0001", "Content": "Population: Germany, reference date", "Time": "31.12.1950 - 31.12.2022"}],
            "Copyright": "© Federal Statistical Office (Destatis), 2023"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, tmp.path());
    let result = client.search("population", Category::Tables, 10).await.unwrap();
    assert_eq!(result.tables.len(), 1);
    assert_eq!(result.total(), 1);

    let requests = server.received_requests().await.unwrap();
    let agent = requests[0].headers.get("user-agent").unwrap();
    assert_eq!(agent.to_str().unwrap(), "destatis-tests/1.0");
}

#[tokio::test]
async fn download_table_persists_into_download_dir() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let csv = "Stichtag;Anzahl\n31.12.2022;84358845\n";
    Mock::given(method("GET"))
        .and(path("/data/tablefile"))
        .and(query_param("name", "12411-0001"))
        .and(query_param("format", "csv"))
        .and(query_param("startyear", "2020"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
        .mount(&server)
        .await;

    let download_dir = tmp.path().join("nested").join("downloads");
    let client = client_for(&server, &download_dir);
    let saved = client
        .download_table("12411-0001", &Selection::new().years(2020, 2022), FileFormat::Csv)
        .await
        .unwrap();

    assert_eq!(saved, download_dir.join("12411-0001.csv"));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), csv);
}

#[tokio::test]
async fn download_chart_saves_png() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    Mock::given(method("GET"))
        .and(path("/data/chart2timeseries"))
        .and(query_param("charttype", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .mount(&server)
        .await;

    let client = client_for(&server, tmp.path());
    let saved = client
        .download_chart(
            "12411BJ001",
            ChartSource::TimeSeries,
            &Selection::new(),
            &ChartOptions::new(ChartType::BarChart),
        )
        .await
        .unwrap();

    assert_eq!(saved, tmp.path().join("12411BJ001.png"));
    assert_eq!(std::fs::read(&saved).unwrap(), png);
}

#[tokio::test]
async fn status_answer_is_a_download_error() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/data/map2table"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Ident": {"Service": "data", "Method": "map2table"},
            "Status": {"Code": 98, "Content": "Job started", "Type": "Warnung"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, tmp.path());
    let err = client
        .download_map("12411-0010", ChartSource::Table, &Selection::new(), &MapOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DestatisError::Download { .. }), "got {err:?}");
    assert!(err.to_string().contains("Job started"));
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn table_info_without_object_is_not_found() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/metadata/table"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Ident": {"Service": "metadata", "Method": "table"},
            "Status": status_ok(),
            "Object": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, tmp.path());
    let err = client.table_info("12411-0001").await.unwrap_err();
    assert!(matches!(err, DestatisError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn genesis_errors_pass_through() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/helloworld/logincheck"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Zugriff verweigert"))
        .mount(&server)
        .await;

    let client = client_for(&server, tmp.path());
    let err = client.login_check().await.unwrap_err();
    assert!(err.is_authentication(), "got {err:?}");
}

#[tokio::test]
async fn missing_credentials_short_circuit() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let config = DestatisConfig::new()
        .with_base_url(server.uri())
        .unwrap()
        .with_download_dir(tmp.path())
        .with_progress(false);
    let client = DestatisClient::with_config(config).unwrap();

    let err = client.list_tables("12411*", 10).await.unwrap_err();
    assert!(err.is_authentication());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn validate_download_dir_creates_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("a").join("b");
    let client = DestatisClient::with_config(
        DestatisConfig::new()
            .with_download_dir(&dir)
            .with_progress(false),
    )
    .unwrap();

    client.validate_download_dir().await.unwrap();
    assert!(dir.is_dir());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[tokio::test]
async fn validate_download_dir_rejects_files() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("not-a-dir");
    std::fs::write(&file, b"x").unwrap();
    let client = DestatisClient::with_config(
        DestatisConfig::new()
            .with_download_dir(&file)
            .with_progress(false),
    )
    .unwrap();

    let err = client.validate_download_dir().await.unwrap_err();
    assert!(matches!(err, DestatisError::Config { .. }));
}
