use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::{ObjectResponse, de};

/// Envelope of every `metadata/*` answer
pub type MetadataResponse<T> = ObjectResponse<T>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubeMetadata {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "State", default, deserialize_with = "de::text")]
    pub state: String,
    #[serde(rename = "Values", default, deserialize_with = "de::opt_count")]
    pub values: Option<u64>,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
    #[serde(
        rename = "Updated",
        default,
        deserialize_with = "de::lenient_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub updated: Option<NaiveDateTime>,
    /// Structure, time slices and other blocks not modelled explicitly
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticMetadata {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "Cubes", default, deserialize_with = "de::opt_count")]
    pub cubes: Option<u64>,
    #[serde(rename = "Variables", default, deserialize_with = "de::opt_count")]
    pub variables: Option<u64>,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
    #[serde(
        rename = "Updated",
        default,
        deserialize_with = "de::lenient_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub updated: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Description of a table including its head/column/row structure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    /// Reporting period, e.g. `31.12.1950 - 31.12.2022`
    #[serde(rename = "Time", default)]
    pub time: Option<Value>,
    #[serde(rename = "Structure", default)]
    pub structure: Option<Value>,
    #[serde(
        rename = "Updated",
        default,
        deserialize_with = "de::lenient_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub updated: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesMetadata {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "State", default, deserialize_with = "de::text")]
    pub state: String,
    #[serde(rename = "Values", default, deserialize_with = "de::opt_count")]
    pub values: Option<u64>,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
    #[serde(
        rename = "Updated",
        default,
        deserialize_with = "de::lenient_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub updated: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueMetadata {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "Variables", default, deserialize_with = "de::opt_count")]
    pub variables: Option<u64>,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
    #[serde(
        rename = "Updated",
        default,
        deserialize_with = "de::lenient_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub updated: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Validity range of a variable
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Validity {
    #[serde(rename = "From", default, deserialize_with = "de::text")]
    pub from: String,
    #[serde(rename = "To", default, deserialize_with = "de::text")]
    pub to: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableMetadata {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "Type", default, deserialize_with = "de::text")]
    pub variable_type: String,
    #[serde(rename = "Values", default, deserialize_with = "de::opt_count")]
    pub values: Option<u64>,
    #[serde(rename = "Validity", default)]
    pub validity: Option<Validity>,
    #[serde(rename = "Information", default, deserialize_with = "de::flag")]
    pub information: bool,
    #[serde(
        rename = "Updated",
        default,
        deserialize_with = "de::lenient_timestamp",
        serialize_with = "de::serialize_opt_timestamp"
    )]
    pub updated: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn table_metadata_keeps_unknown_blocks() {
        let response: MetadataResponse<TableMetadata> = serde_json::from_value(json!({
            "Ident": {"Service": "metadata", "Method": "table"},
            "Status": {"Code": 0, "Content": "erfolgreich", "Type": "Information"},
            "Object": {
                "Code": "12411-0001",
                "Content": "Bevölkerung: Deutschland, Stichtag",
                "Time": {"From": "31.12.1950", "To": "31.12.2022"},
                "Structure": {"Head": {"Code": "12411"}},
                "Updated": "20.06.2023 08:00:30h",
                "Valid": "false"
            },
            "Copyright": "© Statistisches Bundesamt (Destatis), 2023"
        }))
        .unwrap();

        let table = response.object.unwrap();
        assert_eq!(table.code, "12411-0001");
        assert_eq!(table.updated.unwrap().year(), 2023);
        assert!(table.structure.is_some());
        assert_eq!(table.extra.get("Valid"), Some(&json!("false")));
    }

    #[test]
    fn update_stamp_survives_serialization() {
        let table: TableMetadata = serde_json::from_value(json!({
            "Code": "12411-0001",
            "Content": "Bevölkerung: Deutschland, Stichtag",
            "Updated": "10.01.2023 12:30:00h"
        }))
        .unwrap();

        let written = serde_json::to_value(&table).unwrap();
        assert_eq!(written["Updated"], json!("10.01.2023 12:30:00h"));

        let reread: TableMetadata = serde_json::from_value(written).unwrap();
        assert_eq!(reread.updated, table.updated);
        assert!(reread.updated.is_some());

        let cube: CubeMetadata = serde_json::from_value(json!({
            "Code": "12411BJ001",
            "Updated": "10.01.2023 12:30:00h"
        }))
        .unwrap();
        let reread: CubeMetadata =
            serde_json::from_value(serde_json::to_value(&cube).unwrap()).unwrap();
        assert_eq!(reread.updated, cube.updated);
    }

    #[test]
    fn free_text_update_is_absent() {
        let variable: VariableMetadata = serde_json::from_value(json!({
            "Code": "GES",
            "Content": "Geschlecht",
            "Type": "sachlich",
            "Values": "2",
            "Validity": {"From": "", "To": ""},
            "Information": "false",
            "Updated": "siehe Statistik"
        }))
        .unwrap();
        assert!(variable.updated.is_none());
        assert_eq!(variable.values, Some(2));
        assert!(variable.validity.is_some());
    }

    #[test]
    fn missing_object_is_none() {
        let response: MetadataResponse<CubeMetadata> = serde_json::from_value(json!({
            "Status": {"Code": 104, "Content": "Kein passendes Objekt", "Type": "Fehler"}
        }))
        .unwrap();
        assert!(response.object.is_none());
        assert!(response.status.is_error());
    }
}
