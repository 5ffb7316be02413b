use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::endpoints::{Catalogue, Data, Find, HelloWorld, Metadata, Profile};
use crate::enums::Language;
use crate::error::{GenesisError, Result};
use crate::models::{Status, StatusResponse};
use crate::response::{self, DownloadedFile, FileResponse};
use crate::validate;

/// Base URL of the 2020 REST interface
pub const DEFAULT_BASE_URL: &str = "https://www-genesis.destatis.de/genesisWS/rest/2020";

/// User agent sent unless the configuration overrides it
pub const DEFAULT_USER_AGENT: &str = concat!("destatis-genesis-rs/", env!("CARGO_PKG_VERSION"));

/// Account credentials for the GENESIS web service
///
/// Both parts are checked on construction: the user name has exactly 10
/// characters, the password between 10 and 20, neither contains whitespace.
/// The password never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        validate::username(&username)?;
        validate::password("password", &password)?;
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Configuration for the GENESIS client
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL of the REST interface, without a trailing slash
    pub base_path: String,
    /// User agent string for HTTP requests
    pub user_agent: Option<String>,
    /// HTTP client instance
    pub client: reqwest::Client,
    /// Account used for every method except `helloworld/whoami`
    pub credentials: Option<Credentials>,
    /// Language of textual content in responses
    pub language: Language,
    /// Directory for downloaded files; the system temp directory if unset
    pub temp_dir: Option<PathBuf>,
}

impl Configuration {
    /// Create a new configuration with default values
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_base_path<S: Into<String>>(mut self, base_path: S) -> Self {
        self.base_path = base_path.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_temp_dir<P: Into<PathBuf>>(mut self, temp_dir: P) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            base_path: DEFAULT_BASE_URL.to_owned(),
            user_agent: Some(DEFAULT_USER_AGENT.to_owned()),
            client: reqwest::Client::new(),
            credentials: None,
            language: Language::default(),
            temp_dir: None,
        }
    }
}

/// Query parameters of a single request
///
/// Keys keep their insertion order. Values are URL-encoded when the request
/// URL is built; absent optional values are left out entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: ToString>(mut self, key: &'static str, value: V) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn set_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// # GENESIS Client
///
/// Async client for the JSON/REST web service of the GENESIS database run by
/// the German Federal Statistical Office (DESTATIS).
///
/// The web service is split into sections; each one has its own accessor
/// returning a lightweight wrapper that borrows the client:
///
/// - [`hello_world`](GenesisClient::hello_world): connectivity and login checks
/// - [`find`](GenesisClient::find): full text search
/// - [`catalogue`](GenesisClient::catalogue): listings of every object type
/// - [`data`](GenesisClient::data): tables, time series, cubes, charts and maps
/// - [`metadata`](GenesisClient::metadata): object descriptions
/// - [`profile`](GenesisClient::profile): account maintenance
///
/// ## Usage
///
/// ```rust,no_run
/// use destatis_genesis::{Configuration, Credentials, GenesisClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Configuration::new()
///         .with_credentials(Credentials::new("ABCDEFGHIJ", "secretpassword")?);
///     let client = GenesisClient::new(Arc::new(config));
///
///     let hits = client.find().find("Bevölkerung", Default::default(), 10).await?;
///     for table in &hits.tables {
///         println!("{}: {}", table.code, table.content);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct GenesisClient {
    configuration: Arc<Configuration>,
}

impl std::fmt::Debug for GenesisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenesisClient")
            .field("base_path", &self.configuration.base_path)
            .field("language", &self.configuration.language)
            .field(
                "username",
                &self.configuration.credentials.as_ref().map(|c| c.username()),
            )
            .finish()
    }
}

impl GenesisClient {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn hello_world(&self) -> HelloWorld<'_> {
        HelloWorld::new(self)
    }

    pub fn find(&self) -> Find<'_> {
        Find::new(self)
    }

    pub fn catalogue(&self) -> Catalogue<'_> {
        Catalogue::new(self)
    }

    pub fn data(&self) -> Data<'_> {
        Data::new(self)
    }

    pub fn metadata(&self) -> Metadata<'_> {
        Metadata::new(self)
    }

    pub fn profile(&self) -> Profile<'_> {
        Profile::new(self)
    }

    /// Request `path` and parse the JSON answer into `T`
    ///
    /// With `authenticated` set the configured credentials and language are sent
    /// ahead of `query`; without credentials the call fails before any I/O.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
        authenticated: bool,
    ) -> Result<T> {
        let query = self.prepare(query, authenticated)?;
        let response = self.send(path, &query).await?;
        let body = response.bytes().await?;
        parse_json(path, &body)
    }

    /// Request `path` from an endpoint that answers with a file
    ///
    /// Non-JSON bodies are streamed into a temporary file. A JSON body is a
    /// status document and comes back as [`FileResponse::Status`], or as
    /// [`GenesisError::Database`] when the status reports an error.
    pub async fn get_file(&self, path: &str, query: Query) -> Result<FileResponse> {
        let query = self.prepare(query, true)?;
        let response = self.send(path, &query).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if response::is_json(&content_type) {
            let body = response.bytes().await?;
            let status: StatusResponse = parse_json(path, &body)?;
            debug!(path, code = status.status.code, "file endpoint answered with a status");
            return Ok(FileResponse::Status(status));
        }

        let file = DownloadedFile::from_response(response, self.configuration.temp_dir.as_deref()).await?;
        Ok(FileResponse::File(file))
    }

    fn prepare(&self, query: Query, authenticated: bool) -> Result<Query> {
        if !authenticated {
            return Ok(query);
        }
        let credentials = self
            .configuration
            .credentials
            .as_ref()
            .ok_or(GenesisError::MissingCredentials)?;

        let mut pairs = vec![
            ("username", credentials.username().to_string()),
            ("password", credentials.password().to_string()),
            ("language", self.configuration.language.as_str().to_string()),
        ];
        pairs.extend(query.pairs);
        Ok(Query { pairs })
    }

    fn url(&self, path: &str, query: &Query) -> Result<String> {
        let base = self.configuration.base_path.trim_end_matches('/');
        url::Url::parse(base).map_err(|e| {
            GenesisError::validation("base_path", format!("'{}' is not a valid URL: {}", base, e))
        })?;

        let mut url = format!("{}{}", base, path);
        if !query.pairs.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }
        Ok(url)
    }

    async fn send(&self, path: &str, query: &Query) -> Result<reqwest::Response> {
        let url = self.url(path, query)?;
        // the URL carries the password, so only the path is logged
        debug!(path, "GET");

        let mut request = self.configuration.client.get(&url);
        if let Some(user_agent) = &self.configuration.user_agent {
            request = request.header(reqwest::header::USER_AGENT, user_agent);
        }
        let response = request.send().await.map_err(|e| e.without_url())?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(path, status = status.as_u16(), "request failed");
        Err(GenesisError::from_status(status.as_u16(), message))
    }
}

/// Parse a JSON body, surfacing an error status block as [`GenesisError::Database`]
fn parse_json<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(body).inspect_err(|e| {
        warn!(path, error = %e, "response is not valid JSON");
    })?;

    if let Some(raw) = value.get("Status").filter(|s| s.is_object())
        && let Ok(status) = Status::deserialize(raw)
    {
        if status.is_error() {
            warn!(path, code = status.code, "database reported an error");
            return Err(GenesisError::Database {
                code: status.code,
                content: status.content,
            });
        }
        if status.is_warning() {
            debug!(path, code = status.code, content = %status.content, "database warning");
        }
    }

    serde_json::from_value(value).map_err(|e| {
        warn!(path, error = %e, "unexpected response shape");
        GenesisError::Parse(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials::new("ABCDEFGHIJ", "supersecret1").unwrap();
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("ABCDEFGHIJ"));
        assert!(!debug.contains("supersecret1"));
    }

    #[test]
    fn query_encodes_values_in_order() {
        let query = Query::new()
            .set("term", "Bevölkerung & Fläche")
            .set_opt("selection", None::<&str>)
            .set("pagelength", 10);
        assert_eq!(query.get("pagelength"), Some("10"));
        assert_eq!(query.get("selection"), None);
        assert_eq!(
            query.encode(),
            "term=Bev%C3%B6lkerung%20%26%20Fl%C3%A4che&pagelength=10"
        );
    }

    #[test]
    fn authenticated_query_needs_credentials() {
        let client = GenesisClient::new(Arc::new(Configuration::new()));
        let err = client.prepare(Query::new(), true).unwrap_err();
        assert!(matches!(err, GenesisError::MissingCredentials));
        assert!(client.prepare(Query::new(), false).is_ok());
    }

    #[test]
    fn base_parameters_come_first() {
        let config = Configuration::new()
            .with_credentials(Credentials::new("ABCDEFGHIJ", "0123456789").unwrap())
            .with_language(Language::English);
        let client = GenesisClient::new(Arc::new(config));
        let query = client.prepare(Query::new().set("name", "12411"), true).unwrap();
        assert_eq!(
            query.encode(),
            "username=ABCDEFGHIJ&password=0123456789&language=en&name=12411"
        );
    }

    #[test]
    fn error_status_becomes_database_error() {
        let body = br#"{"Status": {"Code": 104, "Content": "Kein passendes Objekt", "Type": "Fehler"}}"#;
        let err = parse_json::<StatusResponse>("/find/find", body).unwrap_err();
        assert!(matches!(err, GenesisError::Database { code: 104, .. }));
    }

    #[test]
    fn invalid_base_path_is_rejected() {
        let client = GenesisClient::new(Arc::new(Configuration::new().with_base_path("not a url")));
        assert!(client.url("/helloworld/whoami", &Query::new()).is_err());
    }
}
