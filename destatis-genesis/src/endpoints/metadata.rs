use crate::client::{GenesisClient, Query};
use crate::enums::ObjectStorage;
use crate::error::Result;
use crate::models::{
    CubeMetadata, MetadataResponse, StatisticMetadata, TableMetadata, TimeSeriesMetadata,
    ValueMetadata, VariableMetadata,
};
use crate::validate;

/// `metadata` section: descriptions of single objects
#[derive(Debug, Clone, Copy)]
pub struct Metadata<'a> {
    client: &'a GenesisClient,
}

impl<'a> Metadata<'a> {
    pub(crate) fn new(client: &'a GenesisClient) -> Self {
        Self { client }
    }

    async fn describe<T>(&self, method: &str, name: &str, area: ObjectStorage) -> Result<MetadataResponse<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let name = validate::object_name(name)?;
        let query = Query::new().set("name", name).set("area", area);
        self.client
            .get_json(&format!("/metadata/{}", method), query, true)
            .await
    }

    pub async fn cube(&self, name: &str, area: ObjectStorage) -> Result<MetadataResponse<CubeMetadata>> {
        self.describe("cube", name, area).await
    }

    pub async fn statistic(
        &self,
        name: &str,
        area: ObjectStorage,
    ) -> Result<MetadataResponse<StatisticMetadata>> {
        self.describe("statistic", name, area).await
    }

    pub async fn table(&self, name: &str, area: ObjectStorage) -> Result<MetadataResponse<TableMetadata>> {
        self.describe("table", name, area).await
    }

    pub async fn timeseries(
        &self,
        name: &str,
        area: ObjectStorage,
    ) -> Result<MetadataResponse<TimeSeriesMetadata>> {
        self.describe("timeseries", name, area).await
    }

    pub async fn value(&self, name: &str, area: ObjectStorage) -> Result<MetadataResponse<ValueMetadata>> {
        self.describe("value", name, area).await
    }

    pub async fn variable(
        &self,
        name: &str,
        area: ObjectStorage,
    ) -> Result<MetadataResponse<VariableMetadata>> {
        self.describe("variable", name, area).await
    }
}
