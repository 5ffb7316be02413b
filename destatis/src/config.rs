use std::path::PathBuf;
use std::sync::Arc;

use destatis_genesis::{Configuration as GenesisConfiguration, Credentials, Language};

use crate::colors::ColorMode;
use crate::error::{DestatisError, Result};

/// Default request timeout; table exports of large cubes can take a while
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the DESTATIS client
#[derive(Debug, Clone)]
pub struct DestatisConfig {
    /// GENESIS client configuration
    pub genesis_config: Arc<GenesisConfiguration>,
    /// Directory downloaded tables, charts and maps are saved to
    pub download_dir: PathBuf,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Show a spinner while waiting for the web service
    pub show_progress: bool,
    pub color_mode: ColorMode,
}

impl Default for DestatisConfig {
    fn default() -> Self {
        Self {
            genesis_config: Arc::new(GenesisConfiguration::default()),
            download_dir: default_download_dir(),
            user_agent: destatis_genesis::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_progress: true,
            color_mode: ColorMode::default(),
        }
    }
}

/// `<Downloads>/destatis`, or `./destatis` where the platform has no download folder
fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("destatis")
}

impl DestatisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the `GENESIS_*` environment variables
    ///
    /// Recognized variables: `GENESIS_USERNAME`, `GENESIS_PASSWORD`,
    /// `GENESIS_LANGUAGE`, `GENESIS_BASE_URL`, `GENESIS_USER_AGENT` and
    /// `GENESIS_DOWNLOAD_DIR`. Unset or empty variables keep the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DestatisConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_credentials(lookup, None, None)
    }

    /// Like [`DestatisConfig::from_lookup`], with `username` and `password`
    /// taking precedence over `GENESIS_USERNAME` and `GENESIS_PASSWORD`
    ///
    /// Each half falls back to its variable on its own, so a password given
    /// on the command line combines with a username from the environment.
    pub fn from_lookup_with_credentials<F>(
        lookup: F,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::new();

        let username = username.or_else(|| get("GENESIS_USERNAME"));
        let password = password.or_else(|| get("GENESIS_PASSWORD"));
        match (username, password) {
            (Some(username), Some(password)) => {
                config = config.with_credentials(Credentials::new(username, password)?);
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(DestatisError::config(
                    "a username is set but no password (GENESIS_PASSWORD or --password)",
                ));
            }
            (None, Some(_)) => {
                return Err(DestatisError::config(
                    "a password is set but no username (GENESIS_USERNAME or --username)",
                ));
            }
        }

        if let Some(language) = get("GENESIS_LANGUAGE") {
            let language = language
                .parse::<Language>()
                .map_err(DestatisError::config)?;
            config = config.with_language(language);
        }
        if let Some(base_url) = get("GENESIS_BASE_URL") {
            config = config.with_base_url(base_url)?;
        }
        if let Some(user_agent) = get("GENESIS_USER_AGENT") {
            config = config.with_user_agent(user_agent);
        }
        if let Some(dir) = get("GENESIS_DOWNLOAD_DIR") {
            config = config.with_download_dir(dir);
        }
        Ok(config)
    }

    fn update_genesis<F>(&mut self, update: F)
    where
        F: FnOnce(GenesisConfiguration) -> GenesisConfiguration,
    {
        let genesis_config = (*self.genesis_config).clone();
        self.genesis_config = Arc::new(update(genesis_config));
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.update_genesis(|c| c.with_credentials(credentials));
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.update_genesis(|c| c.with_language(language));
        self
    }

    /// Point the client at another GENESIS instance, e.g. `https://www.regionalstatistik.de/genesisws/rest/2020`
    pub fn with_base_url<S: AsRef<str>>(mut self, base_url: S) -> Result<Self> {
        let parsed = url::Url::parse(base_url.as_ref())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DestatisError::config(format!(
                "Unsupported URL scheme '{}' in {}",
                parsed.scheme(),
                base_url.as_ref()
            )));
        }
        let base_url = base_url.as_ref().to_string();
        self.update_genesis(|c| c.with_base_path(base_url));
        Ok(self)
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        let user_agent = self.user_agent.clone();
        self.update_genesis(|c| c.with_user_agent(user_agent));
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs.max(1);
        self
    }

    pub fn with_download_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    /// Whether credentials are configured
    pub fn is_authenticated(&self) -> bool {
        self.genesis_config.credentials.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = DestatisConfig::new();
        assert!(!config.is_authenticated());
        assert!(config.download_dir.ends_with("destatis"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.genesis_config.language, Language::German);
    }

    #[test]
    fn reads_environment() {
        let config = DestatisConfig::from_lookup(lookup(&[
            ("GENESIS_USERNAME", "ABCDEFGHIJ"),
            ("GENESIS_PASSWORD", "secret-password"),
            ("GENESIS_LANGUAGE", "en"),
            ("GENESIS_BASE_URL", "http://localhost:9000/rest/2020/"),
            ("GENESIS_USER_AGENT", "tests/1.0"),
            ("GENESIS_DOWNLOAD_DIR", "/tmp/genesis"),
        ]))
        .unwrap();

        assert!(config.is_authenticated());
        assert_eq!(config.genesis_config.language, Language::English);
        assert_eq!(config.genesis_config.base_path, "http://localhost:9000/rest/2020");
        assert_eq!(config.genesis_config.user_agent.as_deref(), Some("tests/1.0"));
        assert_eq!(config.user_agent, "tests/1.0");
        assert_eq!(config.download_dir, PathBuf::from("/tmp/genesis"));
    }

    #[test]
    fn empty_variables_keep_defaults() {
        let config = DestatisConfig::from_lookup(lookup(&[
            ("GENESIS_USERNAME", ""),
            ("GENESIS_LANGUAGE", " "),
        ]))
        .unwrap();
        assert!(!config.is_authenticated());
        assert_eq!(config.genesis_config.language, Language::German);
    }

    #[test]
    fn rejects_half_configured_credentials() {
        let err = DestatisConfig::from_lookup(lookup(&[("GENESIS_USERNAME", "ABCDEFGHIJ")]))
            .unwrap_err();
        assert!(matches!(err, DestatisError::Config { .. }));
    }

    #[test]
    fn explicit_credentials_combine_with_environment() {
        let config = DestatisConfig::from_lookup_with_credentials(
            lookup(&[("GENESIS_USERNAME", "ABCDEFGHIJ")]),
            None,
            Some("secret-password".to_string()),
        )
        .unwrap();
        let credentials = config.genesis_config.credentials.as_ref().unwrap();
        assert_eq!(credentials.username(), "ABCDEFGHIJ");

        let config = DestatisConfig::from_lookup_with_credentials(
            lookup(&[
                ("GENESIS_USERNAME", "ABCDEFGHIJ"),
                ("GENESIS_PASSWORD", "secret-password"),
            ]),
            Some("KLMNOPQRST".to_string()),
            None,
        )
        .unwrap();
        let credentials = config.genesis_config.credentials.as_ref().unwrap();
        assert_eq!(credentials.username(), "KLMNOPQRST");

        let err = DestatisConfig::from_lookup_with_credentials(
            lookup(&[]),
            Some("ABCDEFGHIJ".to_string()),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no password"));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = DestatisConfig::from_lookup(lookup(&[("GENESIS_LANGUAGE", "klingon")]))
            .unwrap_err();
        assert!(err.to_string().contains("klingon"));

        let err = DestatisConfig::from_lookup(lookup(&[
            ("GENESIS_USERNAME", "short"),
            ("GENESIS_PASSWORD", "secret-password"),
        ]))
        .unwrap_err();
        assert!(matches!(err, DestatisError::Genesis(_)));

        assert!(DestatisConfig::new().with_base_url("not a url").is_err());
        assert!(DestatisConfig::new().with_base_url("ftp://example.org").is_err());
    }
}
