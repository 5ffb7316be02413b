//! Typed records for the responses of the GENESIS web service
//!
//! Most responses share an envelope of `Ident`, `Status`, `Parameter` and
//! `Copyright` blocks around the actual payload (`List` or `Object`).

pub mod catalogue;
pub mod data;
pub mod de;
pub mod hello_world;
pub mod metadata;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::enums::Language;

pub use catalogue::*;
pub use data::*;
pub use hello_world::*;
pub use metadata::*;

/// Identification of the service and method that produced a response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    #[serde(rename = "Service", default, deserialize_with = "de::text")]
    pub service: String,
    #[serde(rename = "Method", default, deserialize_with = "de::text")]
    pub method: String,
}

/// Status block returned with every enveloped response
///
/// A `code` of `0` means success. Warnings (e.g. a truncated result list) carry
/// a non-zero code but are not errors; only a `Type` of `Fehler`/`Error` is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(rename = "Code", deserialize_with = "de::code")]
    pub code: i64,
    #[serde(rename = "Content", default, deserialize_with = "de::text")]
    pub content: String,
    #[serde(rename = "Type", default, deserialize_with = "de::text")]
    pub status_type: String,
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(
            self.status_type.trim().to_lowercase().as_str(),
            "fehler" | "error"
        )
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self.status_type.trim().to_lowercase().as_str(),
            "warnung" | "warning"
        )
    }
}

/// Parameters echoed back by the service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Parameter {
    /// The response language, if the service echoed a known one
    pub fn language(&self) -> Option<Language> {
        self.language.as_deref().and_then(|l| l.parse().ok())
    }

    /// An echoed parameter rendered as text
    pub fn get(&self, key: &str) -> Option<String> {
        match self.extra.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Envelope without a payload, e.g. for profile changes or created jobs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "Ident", default)]
    pub ident: Ident,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Parameter", default)]
    pub parameter: Option<Parameter>,
    #[serde(rename = "Copyright", default)]
    pub copyright: Option<String>,
}

/// Answer of the `profile/*` methods
pub type ProfileResponse = StatusResponse;

/// Envelope around a `List` payload
///
/// A missing or `null` list materializes as an empty vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(rename = "Ident", default)]
    pub ident: Ident,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Parameter", default)]
    pub parameter: Option<Parameter>,
    #[serde(rename = "List", default = "Vec::new", deserialize_with = "de::list")]
    pub list: Vec<T>,
    #[serde(rename = "Copyright", default)]
    pub copyright: Option<String>,
}

impl<T> ListResponse<T> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

/// Envelope around an `Object` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ObjectResponse<T> {
    #[serde(rename = "Ident", default)]
    pub ident: Ident,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Parameter", default)]
    pub parameter: Option<Parameter>,
    #[serde(rename = "Object", default = "Option::default")]
    pub object: Option<T>,
    #[serde(rename = "Copyright", default)]
    pub copyright: Option<String>,
}
