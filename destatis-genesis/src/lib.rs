//! Async client for the JSON/REST web service of the DESTATIS GENESIS database
//!
//! Start with a [`Configuration`], wrap it in an `Arc`, and hand it to
//! [`GenesisClient::new`]. The sections of the web service hang off the client
//! as accessor methods.

#![allow(clippy::too_many_arguments)]

pub mod client;
pub mod endpoints;
pub mod enums;
pub mod error;
pub mod models;
pub mod response;
mod validate;

pub use client::{
    Configuration, Credentials, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, GenesisClient, Query,
};
pub use endpoints::{ChartOptions, Classifier, CubeOptions, MapOptions, Selection, TableOptions};
pub use enums::*;
pub use error::{GenesisError, Result};
pub use response::{DownloadedFile, FileResponse};
pub use validate::MAX_PAGE_LENGTH;

// Re-export for callers building selections or reading timestamps
pub use chrono;
