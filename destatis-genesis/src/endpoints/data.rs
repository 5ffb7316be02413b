use chrono::NaiveDateTime;

use crate::client::{GenesisClient, Query};
use crate::enums::{ChartType, FileFormat, ImageSize, ObjectStorage};
use crate::error::{GenesisError, Result};
use crate::models::{DataResponse, de};
use crate::response::FileResponse;
use crate::validate;

/// A classifying variable and the keys selected from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    pub variable: String,
    pub keys: Vec<String>,
}

/// Narrowing of the data returned for a table, time series or cube
///
/// An empty selection returns everything the object holds.
///
/// ```rust
/// use destatis_genesis::Selection;
///
/// let selection = Selection::new()
///     .years(2015, 2022)
///     .region("DLAND", ["01", "02"])
///     .classify("GES", ["GESM"]);
/// assert_eq!(selection.classifiers.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub regional_variable: Option<String>,
    pub regional_keys: Vec<String>,
    /// At most three classifiers are accepted by the web service
    pub classifiers: Vec<Classifier>,
    /// Only return data updated after this point in time (`stand`)
    pub updated_after: Option<NaiveDateTime>,
    /// Value codes to include; all of them when empty
    pub contents: Vec<String>,
}

impl Selection {
    pub const MAX_CLASSIFIERS: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(mut self, start: i32, end: i32) -> Self {
        self.start_year = Some(start);
        self.end_year = Some(end);
        self
    }

    pub fn start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn end_year(mut self, year: i32) -> Self {
        self.end_year = Some(year);
        self
    }

    pub fn region<I, S>(mut self, variable: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regional_variable = Some(variable.into());
        self.regional_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn classify<I, S>(mut self, variable: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classifiers.push(Classifier {
            variable: variable.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn updated_after(mut self, timestamp: NaiveDateTime) -> Self {
        self.updated_after = Some(timestamp);
        self
    }

    pub fn content(mut self, code: impl Into<String>) -> Self {
        self.contents.push(code.into());
        self
    }

    fn apply(&self, mut query: Query) -> Result<Query> {
        if let (Some(start), Some(end)) = (self.start_year, self.end_year)
            && start > end
        {
            return Err(GenesisError::validation(
                "start_year",
                format!("{} lies after the end year {}", start, end),
            ));
        }
        if self.classifiers.len() > Self::MAX_CLASSIFIERS {
            return Err(GenesisError::validation(
                "classifiers",
                format!(
                    "at most {} classifiers are supported (got {})",
                    Self::MAX_CLASSIFIERS,
                    self.classifiers.len()
                ),
            ));
        }

        query = query
            .set_opt("contents", joined(&self.contents))
            .set_opt("startyear", self.start_year)
            .set_opt("endyear", self.end_year)
            .set_opt("regionalvariable", self.regional_variable.as_deref())
            .set_opt("regionalkey", joined(&self.regional_keys));

        const VARIABLES: [&str; 3] = [
            "classifyingvariable1",
            "classifyingvariable2",
            "classifyingvariable3",
        ];
        const KEYS: [&str; 3] = ["classifyingkey1", "classifyingkey2", "classifyingkey3"];
        for (i, classifier) in self.classifiers.iter().enumerate() {
            query = query
                .set(VARIABLES[i], &classifier.variable)
                .set_opt(KEYS[i], joined(&classifier.keys));
        }

        Ok(query.set_opt(
            "stand",
            self.updated_after.map(|t| t.format(de::TIMESTAMP_FORMAT)),
        ))
    }
}

fn joined(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

/// Rendering options of the `chart2*` methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartOptions {
    pub chart_type: ChartType,
    pub image_size: ImageSize,
    /// Highlight the data points; only valid for line charts
    pub draw_points: bool,
    /// Fit the y-axis to the value range instead of starting at zero
    pub compress_y_axis: bool,
    /// Pie charts: show the top five values as slices. Other charts: show the
    /// top four values instead of the first four.
    pub tops: bool,
}

impl ChartOptions {
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    fn apply(&self, query: Query) -> Result<Query> {
        if self.draw_points && self.chart_type != ChartType::LineChart {
            return Err(GenesisError::validation(
                "draw_points",
                "is only supported for line charts",
            ));
        }
        Ok(query
            .set("charttype", self.chart_type)
            .set("drawpoints", self.draw_points)
            .set("zoom", self.image_size)
            .set("focus", self.compress_y_axis)
            .set("tops", self.tops)
            .set("format", "png"))
    }
}

/// Rendering options of the `map2*` methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Map projection; `0` is the only one offered for Germany
    pub map_type: u8,
    /// Number of value classes, 2 to 5
    pub classes: u8,
    /// Classify by equal value ranges instead of equal counts
    pub equal_range: bool,
    pub image_size: ImageSize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            map_type: 0,
            classes: 5,
            equal_range: true,
            image_size: ImageSize::default(),
        }
    }
}

impl MapOptions {
    fn apply(&self, query: Query) -> Result<Query> {
        let classes = validate::range("classes", self.classes, 2, 5)?;
        Ok(query
            .set("mapType", self.map_type)
            .set("classes", classes)
            .set("classification", u8::from(self.equal_range))
            .set("zoom", self.image_size)
            .set("format", "png"))
    }
}

/// What a cube export contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeOptions {
    pub values: bool,
    pub metadata: bool,
    pub additionals: bool,
}

impl Default for CubeOptions {
    fn default() -> Self {
        Self {
            values: true,
            metadata: true,
            additionals: false,
        }
    }
}

impl CubeOptions {
    fn apply(&self, query: Query) -> Query {
        query
            .set("values", self.values)
            .set("metadata", self.metadata)
            .set("additionals", self.additionals)
    }
}

/// Layout options for tables and time series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Drop rows without values
    pub compress: bool,
    /// Swap rows and columns
    pub transpose: bool,
    /// Run the request as a background job; the answer then is a status
    pub job: bool,
}

impl TableOptions {
    fn apply(&self, query: Query) -> Query {
        query
            .set("compress", self.compress)
            .set("transpose", self.transpose)
            .set("job", self.job)
    }
}

/// `data` section: the actual statistical data
#[derive(Debug, Clone, Copy)]
pub struct Data<'a> {
    client: &'a GenesisClient,
}

impl<'a> Data<'a> {
    pub(crate) fn new(client: &'a GenesisClient) -> Self {
        Self { client }
    }

    fn base(name: &str, area: ObjectStorage) -> Result<Query> {
        let name = validate::object_name(name)?;
        Ok(Query::new().set("name", name).set("area", area))
    }

    fn time_slices(query: Query, time_slices: Option<u32>) -> Result<Query> {
        let time_slices = time_slices
            .map(|t| validate::range("time_slices", t, 1, u32::MAX))
            .transpose()?;
        Ok(query.set_opt("timeslices", time_slices))
    }

    /// Chart of a result table stored for the account
    pub async fn chart2result(
        &self,
        name: &str,
        area: ObjectStorage,
        chart: &ChartOptions,
    ) -> Result<FileResponse> {
        let query = chart.apply(Self::base(name, area)?)?;
        self.client.get_file("/data/chart2result", query).await
    }

    /// Chart of a table, optionally aggregated into `time_slices`
    pub async fn chart2table(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        chart: &ChartOptions,
        time_slices: Option<u32>,
    ) -> Result<FileResponse> {
        let query = chart.apply(Self::base(name, area)?)?;
        let query = Self::time_slices(selection.apply(query)?, time_slices)?;
        self.client.get_file("/data/chart2table", query).await
    }

    /// Chart of a time series, optionally aggregated into `time_slices`
    pub async fn chart2timeseries(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        chart: &ChartOptions,
        time_slices: Option<u32>,
    ) -> Result<FileResponse> {
        let query = chart.apply(Self::base(name, area)?)?;
        let query = Self::time_slices(selection.apply(query)?, time_slices)?;
        self.client.get_file("/data/chart2timeseries", query).await
    }

    /// A data cube with its values embedded as text
    pub async fn cube(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        options: &CubeOptions,
    ) -> Result<DataResponse> {
        let query = selection.apply(Self::base(name, area)?)?;
        let query = options.apply(query).set("format", "csv");
        self.client.get_json("/data/cube", query, true).await
    }

    /// A data cube as a file
    pub async fn cubefile(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        options: &CubeOptions,
    ) -> Result<FileResponse> {
        let query = selection.apply(Self::base(name, area)?)?;
        let query = options.apply(query).set("format", "csv");
        self.client.get_file("/data/cubefile", query).await
    }

    /// Map of a result table stored for the account
    pub async fn map2result(
        &self,
        name: &str,
        area: ObjectStorage,
        map: &MapOptions,
    ) -> Result<FileResponse> {
        let query = map.apply(Self::base(name, area)?)?;
        self.client.get_file("/data/map2result", query).await
    }

    pub async fn map2table(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        map: &MapOptions,
    ) -> Result<FileResponse> {
        let query = selection.apply(map.apply(Self::base(name, area)?)?)?;
        self.client.get_file("/data/map2table", query).await
    }

    pub async fn map2timeseries(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        map: &MapOptions,
    ) -> Result<FileResponse> {
        let query = selection.apply(map.apply(Self::base(name, area)?)?)?;
        self.client.get_file("/data/map2timeseries", query).await
    }

    /// A result table stored for the account
    pub async fn result(&self, name: &str, area: ObjectStorage, compress: bool) -> Result<DataResponse> {
        let query = Self::base(name, area)?.set("compress", compress);
        self.client.get_json("/data/result", query, true).await
    }

    pub async fn table(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        options: &TableOptions,
    ) -> Result<DataResponse> {
        let query = options.apply(selection.apply(Self::base(name, area)?)?);
        self.client.get_json("/data/table", query, true).await
    }

    pub async fn tablefile(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        options: &TableOptions,
        format: FileFormat,
    ) -> Result<FileResponse> {
        let query = options.apply(selection.apply(Self::base(name, area)?)?);
        self.client
            .get_file("/data/tablefile", query.set("format", format))
            .await
    }

    pub async fn timeseries(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        options: &TableOptions,
    ) -> Result<DataResponse> {
        let query = options.apply(selection.apply(Self::base(name, area)?)?);
        self.client.get_json("/data/timeseries", query, true).await
    }

    pub async fn timeseriesfile(
        &self,
        name: &str,
        area: ObjectStorage,
        selection: &Selection,
        options: &TableOptions,
        format: FileFormat,
    ) -> Result<FileResponse> {
        let query = options.apply(selection.apply(Self::base(name, area)?)?);
        self.client
            .get_file("/data/timeseriesfile", query.set("format", format))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn selection_parameters() {
        let updated = NaiveDate::from_ymd_opt(2023, 1, 10)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let query = Selection::new()
            .years(2015, 2022)
            .region("DLAND", ["01", "02"])
            .classify("GES", ["GESM", "GESW"])
            .updated_after(updated)
            .apply(Query::new())
            .unwrap();

        assert_eq!(query.get("startyear"), Some("2015"));
        assert_eq!(query.get("regionalkey"), Some("01,02"));
        assert_eq!(query.get("classifyingvariable1"), Some("GES"));
        assert_eq!(query.get("classifyingkey1"), Some("GESM,GESW"));
        assert_eq!(query.get("classifyingvariable2"), None);
        assert_eq!(query.get("stand"), Some("10.01.2023 12:30:00h"));
        assert_eq!(query.get("contents"), None);
    }

    #[test]
    fn selection_limits() {
        let too_many = Selection::new()
            .classify("A", ["1"])
            .classify("B", ["1"])
            .classify("C", ["1"])
            .classify("D", ["1"]);
        assert!(too_many.apply(Query::new()).is_err());
        assert!(Selection::new().years(2022, 2015).apply(Query::new()).is_err());
    }

    #[test]
    fn draw_points_only_for_line_charts() {
        let mut chart = ChartOptions::new(ChartType::BarChart);
        chart.draw_points = true;
        assert!(chart.apply(Query::new()).is_err());

        let mut chart = ChartOptions::default();
        chart.draw_points = true;
        let query = chart.apply(Query::new()).unwrap();
        assert_eq!(query.get("charttype"), Some("0"));
        assert_eq!(query.get("drawpoints"), Some("true"));
        assert_eq!(query.get("zoom"), Some("3"));
    }

    #[test]
    fn map_classes_range() {
        let map = MapOptions {
            classes: 6,
            ..MapOptions::default()
        };
        assert!(map.apply(Query::new()).is_err());
        let query = MapOptions::default().apply(Query::new()).unwrap();
        assert_eq!(query.get("classes"), Some("5"));
        assert_eq!(query.get("classification"), Some("1"));
    }
}
