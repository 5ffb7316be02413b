use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::{Ident, Parameter, Status, de};

/// Envelope of the `data/*` methods that embed their payload as text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    #[serde(rename = "Ident", default)]
    pub ident: Ident,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Parameter", default)]
    pub parameter: Option<Parameter>,
    #[serde(rename = "Object", default)]
    pub object: Option<DataObject>,
    #[serde(rename = "Copyright", default)]
    pub copyright: Option<String>,
}

/// A table, time series or cube with its values as semicolon separated text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    #[serde(rename = "Code", default, deserialize_with = "de::text")]
    pub code: String,
    /// The CSV (`;` separated) rendering of the data
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "Structure", default)]
    pub structure: Option<Value>,
    #[serde(rename = "Time", default)]
    pub time: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DataObject {
    /// Non-empty lines of the embedded text
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
    }

    /// Lines split into their `;` separated cells
    ///
    /// GENESIS does not quote cells, so no escaping is interpreted here.
    pub fn records(&self) -> Vec<Vec<&str>> {
        self.lines()
            .map(|line| line.split(';').map(str::trim).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_csv_records() {
        let response: DataResponse = serde_json::from_value(json!({
            "Ident": {"Service": "data", "Method": "table"},
            "Status": {"Code": 0, "Content": "erfolgreich", "Type": "Information"},
            "Object": {
                "Code": "12411-0001",
                "Content": "Stichtag;Anzahl\r\n31.12.2021;83237124\r\n31.12.2022;84358845\r\n\r\n",
                "Structure": {"Head": {"Code": "12411-0001"}}
            }
        }))
        .unwrap();

        let object = response.object.unwrap();
        let records = object.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], vec!["Stichtag", "Anzahl"]);
        assert_eq!(records[2][1], "84358845");
    }
}
