use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Ident, Parameter, Status, de};

/// A data cube (catalogue `cubes*`, find)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubeInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "State", default, deserialize_with = "de::text")]
    pub state: String,
    /// Textual description of the covered time span
    #[serde(rename = "Time", default, deserialize_with = "de::text")]
    pub time: String,
    #[serde(
        rename = "LatestUpdate",
        default,
        deserialize_with = "de::opt_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub latest_update: Option<NaiveDateTime>,
    /// Whether extra information is available for the cube
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
}

/// A statistic (catalogue `statistics*`, find)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    /// Number of cubes assigned to the statistic
    #[serde(rename = "Cubes", default, deserialize_with = "de::count")]
    pub cubes: u64,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
}

/// A table (catalogue `tables*`, find)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    /// Time period displayed in the table
    #[serde(rename = "Time", default, deserialize_with = "de::text")]
    pub time: String,
}

/// A time series (catalogue `timeseries*`, find)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "State", default, deserialize_with = "de::text")]
    pub state: String,
    #[serde(rename = "Time", default, deserialize_with = "de::text")]
    pub time: String,
    #[serde(
        rename = "LatestUpdate",
        default,
        deserialize_with = "de::opt_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub latest_update: Option<NaiveDateTime>,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
}

/// A variable (catalogue `variables*`, find)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    /// Textual type of the variable, e.g. `sachlich`
    #[serde(rename = "Type", default, deserialize_with = "de::text")]
    pub variable_type: String,
    /// Number of values associated with the variable
    #[serde(rename = "Values", default, deserialize_with = "de::count")]
    pub values: u64,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
}

/// A characteristic value of a variable (catalogue `values*`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    /// Number of variables using the value
    #[serde(rename = "Variables", default, deserialize_with = "de::opt_count")]
    pub variables: Option<u64>,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
}

/// A job of the account (catalogue `jobs`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(
        rename = "Date",
        deserialize_with = "de::date",
        serialize_with = "de::serialize_date"
    )]
    pub date: NaiveDate,
    #[serde(rename = "Time", deserialize_with = "de::time")]
    pub time: NaiveTime,
    #[serde(rename = "State", default, deserialize_with = "de::text")]
    pub state: String,
}

impl JobInformation {
    /// Date and time combined
    pub fn created_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// An object modified recently (catalogue `modifieddata`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModifiedDataInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    /// Type of the modified object
    #[serde(rename = "Type", default, deserialize_with = "de::text")]
    pub object_type: String,
    #[serde(
        rename = "Date",
        deserialize_with = "de::date",
        serialize_with = "de::serialize_date"
    )]
    pub date: NaiveDate,
    /// What has been added
    #[serde(rename = "Added", default, deserialize_with = "de::text")]
    pub added: String,
}

/// A quality sign used in tables (catalogue `qualitysigns`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualitySignInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
}

/// A result table stored for the account (catalogue `results`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultTableInformation {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "Values", default, deserialize_with = "de::count")]
    pub values: u64,
}

/// A search term (catalogue `terms`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermInformation {
    #[serde(rename = "Content")]
    pub term: String,
}

/// Result of `find/find`
///
/// The service omits every category that had no hits (or was not searched), so
/// all lists default to empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FindResult {
    #[serde(rename = "Ident", default)]
    pub ident: Ident,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Parameter", default)]
    pub parameter: Option<Parameter>,
    #[serde(rename = "Cubes", default, deserialize_with = "de::list")]
    pub cubes: Vec<CubeInformation>,
    #[serde(rename = "Statistics", default, deserialize_with = "de::list")]
    pub statistics: Vec<StatisticInformation>,
    #[serde(rename = "Tables", default, deserialize_with = "de::list")]
    pub tables: Vec<TableInformation>,
    #[serde(rename = "Timeseries", default, deserialize_with = "de::list")]
    pub time_series: Vec<TimeSeriesInformation>,
    #[serde(rename = "Variables", default, deserialize_with = "de::list")]
    pub variables: Vec<VariableInformation>,
    #[serde(rename = "Copyright", default)]
    pub copyright: Option<String>,
}

impl FindResult {
    /// Total number of hits over all categories
    pub fn total(&self) -> usize {
        self.cubes.len()
            + self.statistics.len()
            + self.tables.len()
            + self.time_series.len()
            + self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
