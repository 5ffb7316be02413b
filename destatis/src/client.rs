use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use destatis_genesis::models::{
    FindResult, LoginCheck, StatisticInformation, TableInformation, TableMetadata,
    VariableInformation, WhoAmI,
};
use destatis_genesis::{
    Category, ChartOptions, FileFormat, FileResponse, GenericCriteria, GenesisClient, MapOptions,
    ObjectStorage, Selection, StatisticCriteria, TableCriteria, TableOptions, VariableType,
};

use crate::config::DestatisConfig;
use crate::error::{DestatisError, Result};

/// What a chart or map is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartSource {
    #[default]
    Table,
    TimeSeries,
    /// A result table stored for the account; selections do not apply
    Result,
}

impl std::str::FromStr for ChartSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "tables" => Ok(ChartSource::Table),
            "timeseries" | "time_series" => Ok(ChartSource::TimeSeries),
            "result" | "results" => Ok(ChartSource::Result),
            _ => Err(format!(
                "Invalid source: '{}'. Valid options: table, timeseries, result",
                s
            )),
        }
    }
}

/// High-level client for the DESTATIS GENESIS database
///
/// Wraps [`GenesisClient`] with sensible defaults for interactive use and
/// saves downloaded tables, charts and maps into the configured download
/// directory instead of handing out temporary files.
#[derive(Debug, Clone)]
pub struct DestatisClient {
    genesis: GenesisClient,
    config: DestatisConfig,
}

impl DestatisClient {
    /// Create a client from the `GENESIS_*` environment variables
    pub fn new() -> Result<Self> {
        Self::with_config(DestatisConfig::from_env()?)
    }

    pub fn with_config(config: DestatisConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        let genesis_config = (*config.genesis_config)
            .clone()
            .with_client(http_client);
        let genesis = GenesisClient::new(Arc::new(genesis_config));

        Ok(Self { genesis, config })
    }

    // === Account ===

    pub async fn who_am_i(&self) -> Result<WhoAmI> {
        let who = self
            .track("Contacting GENESIS", self.genesis.hello_world().who_am_i())
            .await?;
        Ok(who)
    }

    pub async fn login_check(&self) -> Result<LoginCheck> {
        let check = self
            .track("Checking login", self.genesis.hello_world().login_check())
            .await?;
        Ok(check)
    }

    // === Search and Discovery ===

    /// Full-text search across tables, statistics, cubes, variables and time series
    ///
    /// ```rust,no_run
    /// # use destatis::DestatisClient;
    /// # use destatis::genesis::Category;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = DestatisClient::new()?;
    /// let hits = client.search("Bevölkerung", Category::Tables, 20).await?;
    /// for table in &hits.tables {
    ///     println!("{} {}", table.code, table.content);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, term: &str, category: Category, limit: u32) -> Result<FindResult> {
        let result = self
            .track(
                format!("Searching for '{}'", term),
                self.genesis.find().find(term, category, limit),
            )
            .await?;
        Ok(result)
    }

    /// Metadata of a single table
    pub async fn table_info(&self, name: &str) -> Result<TableMetadata> {
        let response = self
            .track(
                format!("Fetching metadata of {}", name),
                self.genesis.metadata().table(name, ObjectStorage::All),
            )
            .await?;
        response
            .object
            .ok_or_else(|| DestatisError::not_found(format!("No metadata for table {}", name)))
    }

    /// Tables whose code matches `selector`, e.g. `12411*`
    pub async fn list_tables(&self, selector: &str, limit: u32) -> Result<Vec<TableInformation>> {
        let response = self
            .track(
                format!("Listing tables {}", selector),
                self.genesis.catalogue().tables(
                    selector,
                    ObjectStorage::All,
                    TableCriteria::Code,
                    limit,
                ),
            )
            .await?;
        Ok(response.list)
    }

    pub async fn list_statistics(
        &self,
        selector: Option<&str>,
        limit: u32,
    ) -> Result<Vec<StatisticInformation>> {
        let response = self
            .track(
                "Listing statistics",
                self.genesis.catalogue().statistics(
                    selector,
                    StatisticCriteria::Code,
                    StatisticCriteria::Code,
                    limit,
                ),
            )
            .await?;
        Ok(response.list)
    }

    pub async fn list_variables(
        &self,
        selector: &str,
        limit: u32,
    ) -> Result<Vec<VariableInformation>> {
        let response = self
            .track(
                format!("Listing variables {}", selector),
                self.genesis.catalogue().variables(
                    selector,
                    ObjectStorage::All,
                    GenericCriteria::Code,
                    GenericCriteria::Code,
                    VariableType::All,
                    limit,
                ),
            )
            .await?;
        Ok(response.list)
    }

    // === Downloads ===

    /// Download a table and save it as `<download_dir>/<name>.<ext>`
    ///
    /// Returns the path the file was saved to.
    pub async fn download_table(
        &self,
        name: &str,
        selection: &Selection,
        format: FileFormat,
    ) -> Result<PathBuf> {
        let response = self
            .track(
                format!("Downloading table {}", name),
                self.genesis.data().tablefile(
                    name,
                    ObjectStorage::All,
                    selection,
                    &TableOptions::default(),
                    format,
                ),
            )
            .await?;
        self.save(name, response).await
    }

    pub async fn download_timeseries(
        &self,
        name: &str,
        selection: &Selection,
        format: FileFormat,
    ) -> Result<PathBuf> {
        let response = self
            .track(
                format!("Downloading time series {}", name),
                self.genesis.data().timeseriesfile(
                    name,
                    ObjectStorage::All,
                    selection,
                    &TableOptions::default(),
                    format,
                ),
            )
            .await?;
        self.save(name, response).await
    }

    /// Render a chart as PNG and save it into the download directory
    pub async fn download_chart(
        &self,
        name: &str,
        source: ChartSource,
        selection: &Selection,
        chart: &ChartOptions,
    ) -> Result<PathBuf> {
        let data = self.genesis.data();
        let area = ObjectStorage::All;
        let message = format!("Rendering chart of {}", name);
        let response = match source {
            ChartSource::Table => {
                self.track(message, data.chart2table(name, area, selection, chart, None))
                    .await?
            }
            ChartSource::TimeSeries => {
                self.track(
                    message,
                    data.chart2timeseries(name, area, selection, chart, None),
                )
                .await?
            }
            ChartSource::Result => self.track(message, data.chart2result(name, area, chart)).await?,
        };
        self.save(name, response).await
    }

    /// Render a map as PNG and save it into the download directory
    pub async fn download_map(
        &self,
        name: &str,
        source: ChartSource,
        selection: &Selection,
        map: &MapOptions,
    ) -> Result<PathBuf> {
        let data = self.genesis.data();
        let area = ObjectStorage::All;
        let message = format!("Rendering map of {}", name);
        let response = match source {
            ChartSource::Table => {
                self.track(message, data.map2table(name, area, selection, map))
                    .await?
            }
            ChartSource::TimeSeries => {
                self.track(message, data.map2timeseries(name, area, selection, map))
                    .await?
            }
            ChartSource::Result => self.track(message, data.map2result(name, area, map)).await?,
        };
        self.save(name, response).await
    }

    /// Move a downloaded file into the download directory
    async fn save(&self, name: &str, response: FileResponse) -> Result<PathBuf> {
        let file = match response {
            FileResponse::File(file) => file,
            FileResponse::Status(status) => {
                return Err(DestatisError::download(format!(
                    "{} answered with status {}: {}",
                    name, status.status.code, status.status.content
                )));
            }
        };

        let destination = output_path(&self.config.download_dir, name, file.extension());
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let path = file.persist(&destination).await?;
        tracing::debug!(path = %path.display(), "saved download");
        Ok(path)
    }

    /// Run `future` behind a spinner when stderr is a terminal
    async fn track<F, T>(&self, message: impl Into<String>, future: F) -> T
    where
        F: Future<Output = T>,
    {
        let spinner = self.spinner(message.into());
        let output = future.await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        output
    }

    fn spinner(&self, message: String) -> Option<ProgressBar> {
        let enabled = self.config.show_progress
            && std::env::var("NO_PROGRESS").is_err()
            && std::io::stderr().is_terminal();
        if !enabled {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    // === Utility Methods ===

    /// Create the download directory if needed and check that it is writable
    pub async fn validate_download_dir(&self) -> Result<()> {
        let dir = &self.config.download_dir;

        if !dir.exists() {
            tokio::fs::create_dir_all(dir).await?;
        }

        if !dir.is_dir() {
            return Err(DestatisError::config(format!(
                "Download path is not a directory: {}",
                dir.display()
            )));
        }

        let probe = dir.join(".write_test");
        tokio::fs::write(&probe, b"test").await?;
        tokio::fs::remove_file(&probe).await?;

        Ok(())
    }

    pub fn download_dir(&self) -> &Path {
        &self.config.download_dir
    }

    pub fn set_download_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        self.config.download_dir = dir.into();
    }

    pub fn config(&self) -> &DestatisConfig {
        &self.config
    }

    /// The underlying GENESIS client for the methods this facade does not cover
    pub fn genesis(&self) -> &GenesisClient {
        &self.genesis
    }
}

/// `<dir>/<name>.<extension>` with characters unsafe in file names replaced
pub fn output_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    dir.join(format!("{}.{}", stem, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_object_code() {
        let dir = Path::new("/data");
        assert_eq!(
            output_path(dir, "12411-0001", "csv"),
            PathBuf::from("/data/12411-0001.csv")
        );
        assert_eq!(
            output_path(dir, " 12411* ", "png"),
            PathBuf::from("/data/12411_.png")
        );
        assert_eq!(
            output_path(dir, "../etc", "csv"),
            PathBuf::from("/data/.._etc.csv")
        );
    }

    #[test]
    fn chart_source_parsing() {
        assert_eq!("table".parse::<ChartSource>().unwrap(), ChartSource::Table);
        assert_eq!(
            "TimeSeries".parse::<ChartSource>().unwrap(),
            ChartSource::TimeSeries
        );
        assert_eq!("result".parse::<ChartSource>().unwrap(), ChartSource::Result);
        assert!("cube".parse::<ChartSource>().is_err());
    }
}
