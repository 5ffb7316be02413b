use chrono::{Local, NaiveDate};

use crate::client::{GenesisClient, Query};
use crate::enums::{
    GenericCriteria, JobCriteria, JobType, ObjectStorage, ObjectType, StatisticCriteria,
    TableCriteria, VariableType,
};
use crate::error::{GenesisError, Result};
use crate::models::{
    CubeInformation, JobInformation, ListResponse, ModifiedDataInformation,
    QualitySignInformation, ResultTableInformation, StatisticInformation, TableInformation,
    TermInformation, TimeSeriesInformation, ValueInformation, VariableInformation, de,
};
use crate::validate;

/// `catalogue` section: listings of the objects in the database
///
/// Selectors accept `*` as a wildcard unless noted otherwise. `results` is the
/// page length and must lie between 1 and 2500 for every method.
#[derive(Debug, Clone, Copy)]
pub struct Catalogue<'a> {
    client: &'a GenesisClient,
}

impl<'a> Catalogue<'a> {
    pub(crate) fn new(client: &'a GenesisClient) -> Self {
        Self { client }
    }

    async fn list<T>(&self, method: &str, query: Query) -> Result<ListResponse<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        self.client
            .get_json(&format!("/catalogue/{}", method), query, true)
            .await
    }

    /// Cubes whose code matches `selection` (1 to 10 characters)
    pub async fn cubes(
        &self,
        selection: &str,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<CubeInformation>> {
        let selection = validate::length("selection", selection, 1, 10)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selection)
            .set("area", area)
            .set("pagelength", results);
        self.list("cubes", query).await
    }

    /// Cubes belonging to the statistic `name`
    pub async fn cubes2statistic(
        &self,
        name: &str,
        selection: &str,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<CubeInformation>> {
        let name = validate::length("name", name, 1, 6)?;
        let selection = validate::length("selection", selection, 1, 10)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("name", name)
            .set("selection", selection)
            .set("area", area)
            .set("pagelength", results);
        self.list("cubes2statistic", query).await
    }

    /// Cubes using the variable `name`
    pub async fn cubes2variable(
        &self,
        name: &str,
        selection: &str,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<CubeInformation>> {
        let name = validate::length("name", name, 1, 6)?;
        let selection = validate::length("selection", selection, 1, 10)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("name", name)
            .set("selection", selection)
            .set("area", area)
            .set("pagelength", results);
        self.list("cubes2variable", query).await
    }

    /// Jobs of the account; `selector` is 1 to 50 characters
    pub async fn jobs(
        &self,
        selector: &str,
        search_by: JobCriteria,
        sort_by: JobCriteria,
        job_type: JobType,
        results: u32,
    ) -> Result<ListResponse<JobInformation>> {
        let selector = validate::length("selector", selector, 1, 50)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector)
            .set("searchcriterion", search_by)
            .set("sortcriterion", sort_by)
            .set("type", job_type)
            .set("pagelength", results);
        self.list("jobs", query).await
    }

    /// Objects modified after `updated_after`, which has to lie in the past
    pub async fn modified_data(
        &self,
        selector: Option<&str>,
        object_type: ObjectType,
        updated_after: Option<NaiveDate>,
        results: u32,
    ) -> Result<ListResponse<ModifiedDataInformation>> {
        let selector = validate::opt_length("selector", selector, 1, 15)?;
        if let Some(date) = updated_after
            && date >= Local::now().date_naive()
        {
            return Err(GenesisError::validation(
                "updated_after",
                "may not be today or in the future",
            ));
        }
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector.unwrap_or_default())
            .set("type", object_type)
            .set_opt("date", updated_after.map(|d| d.format(de::DATE_FORMAT)))
            .set("pagelength", results);
        self.list("modifieddata", query).await
    }

    /// The quality signs used in tables
    pub async fn quality_signs(&self) -> Result<ListResponse<QualitySignInformation>> {
        self.list("qualitysigns", Query::new()).await
    }

    /// Result tables stored for the account
    pub async fn results(
        &self,
        selector: Option<&str>,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<ResultTableInformation>> {
        let selector = validate::opt_length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector.unwrap_or_default())
            .set("area", area)
            .set("pagelength", results);
        self.list("results", query).await
    }

    pub async fn statistics(
        &self,
        selector: Option<&str>,
        search_by: StatisticCriteria,
        sort_by: StatisticCriteria,
        results: u32,
    ) -> Result<ListResponse<StatisticInformation>> {
        let selector = validate::opt_length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector.unwrap_or_default())
            .set("searchcriterion", search_by)
            .set("sortcriterion", sort_by)
            .set("pagelength", results);
        self.list("statistics", query).await
    }

    /// Statistics using the variable `name`
    pub async fn statistics2variable(
        &self,
        name: &str,
        selector: Option<&str>,
        search_by: StatisticCriteria,
        sort_by: StatisticCriteria,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<StatisticInformation>> {
        let name = validate::length("name", name, 1, 15)?;
        let selector = validate::opt_length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("name", name)
            .set("selection", selector.unwrap_or_default())
            .set("searchcriterion", search_by)
            .set("sortcriterion", sort_by)
            .set("area", area)
            .set("pagelength", results);
        self.list("statistics2variable", query).await
    }

    pub async fn tables(
        &self,
        selector: &str,
        area: ObjectStorage,
        sort_by: TableCriteria,
        results: u32,
    ) -> Result<ListResponse<TableInformation>> {
        let selector = validate::length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector)
            .set("area", area)
            .set("searchcriterion", TableCriteria::Code)
            .set("sortcriterion", sort_by)
            .set("pagelength", results);
        self.list("tables", query).await
    }

    /// Tables belonging to the statistic `name`
    pub async fn tables2statistic(
        &self,
        name: &str,
        selector: Option<&str>,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<TableInformation>> {
        self.named_listing("tables2statistic", name, selector, area, results)
            .await
    }

    /// Tables using the variable `name`
    pub async fn tables2variable(
        &self,
        name: &str,
        selector: Option<&str>,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<TableInformation>> {
        self.named_listing("tables2variable", name, selector, area, results)
            .await
    }

    /// Search terms starting with `selector`
    pub async fn terms(&self, selector: &str, results: u32) -> Result<ListResponse<TermInformation>> {
        let selector = validate::length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector)
            .set("pagelength", results);
        self.list("terms", query).await
    }

    pub async fn timeseries(
        &self,
        selector: &str,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<TimeSeriesInformation>> {
        let selector = validate::length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector)
            .set("area", area)
            .set("pagelength", results);
        self.list("timeseries", query).await
    }

    /// Time series belonging to the statistic `name`
    pub async fn timeseries2statistic(
        &self,
        name: &str,
        selector: Option<&str>,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<TimeSeriesInformation>> {
        self.named_listing("timeseries2statistic", name, selector, area, results)
            .await
    }

    /// Time series using the variable `name`
    pub async fn timeseries2variable(
        &self,
        name: &str,
        selector: Option<&str>,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<TimeSeriesInformation>> {
        self.named_listing("timeseries2variable", name, selector, area, results)
            .await
    }

    pub async fn values(
        &self,
        selector: &str,
        area: ObjectStorage,
        search_by: GenericCriteria,
        sort_by: GenericCriteria,
        results: u32,
    ) -> Result<ListResponse<ValueInformation>> {
        let selector = validate::length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector)
            .set("area", area)
            .set("searchcriterion", search_by)
            .set("sortcriterion", sort_by)
            .set("pagelength", results);
        self.list("values", query).await
    }

    /// Values of the variable `name`, which may not contain wildcards
    pub async fn values2variable(
        &self,
        name: &str,
        selector: Option<&str>,
        area: ObjectStorage,
        search_by: GenericCriteria,
        sort_by: GenericCriteria,
        results: u32,
    ) -> Result<ListResponse<ValueInformation>> {
        let name = validate::no_wildcard("name", validate::length("name", name, 1, 15)?)?;
        let selector = validate::opt_length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("name", name)
            .set("selection", selector.unwrap_or_default())
            .set("area", area)
            .set("searchcriterion", search_by)
            .set("sortcriterion", sort_by)
            .set("pagelength", results);
        self.list("values2variable", query).await
    }

    /// Variables whose code matches `selector` (1 to 6 characters)
    pub async fn variables(
        &self,
        selector: &str,
        area: ObjectStorage,
        search_by: GenericCriteria,
        sort_by: GenericCriteria,
        variable_type: VariableType,
        results: u32,
    ) -> Result<ListResponse<VariableInformation>> {
        let selector = validate::length("selector", selector, 1, 6)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("selection", selector)
            .set("area", area)
            .set("searchcriterion", search_by)
            .set("sortcriterion", sort_by)
            .set("type", variable_type)
            .set("pagelength", results);
        self.list("variables", query).await
    }

    /// Variables used by the statistic `name`, which may not contain wildcards
    pub async fn variables2statistic(
        &self,
        name: &str,
        selector: Option<&str>,
        area: ObjectStorage,
        search_by: GenericCriteria,
        sort_by: GenericCriteria,
        variable_type: VariableType,
        results: u32,
    ) -> Result<ListResponse<VariableInformation>> {
        let name = validate::no_wildcard("name", validate::length("name", name, 1, 15)?)?;
        let selector = validate::opt_length("selector", selector, 1, 6)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("name", name)
            .set("selection", selector.unwrap_or_default())
            .set("area", area)
            .set("searchcriterion", search_by)
            .set("sortcriterion", sort_by)
            .set("type", variable_type)
            .set("pagelength", results);
        self.list("variables2statistic", query).await
    }

    /// Shared shape of the `*2statistic` / `*2variable` listings
    async fn named_listing<T>(
        &self,
        method: &str,
        name: &str,
        selector: Option<&str>,
        area: ObjectStorage,
        results: u32,
    ) -> Result<ListResponse<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let name = validate::length("name", name, 1, 15)?;
        let selector = validate::opt_length("selector", selector, 1, 15)?;
        let results = validate::page_length(results)?;
        let query = Query::new()
            .set("name", name)
            .set("selection", selector.unwrap_or_default())
            .set("area", area)
            .set("pagelength", results);
        self.list(method, query).await
    }
}
