//! # destatis
//!
//! High-level client and command line tool for the GENESIS database of the
//! German Federal Statistical Office (DESTATIS).
//!
//! [`DestatisClient`] wraps the low-level [`genesis`] client, reads its
//! configuration from the environment and saves downloads into a directory.
//!
//! ```rust,no_run
//! use destatis::{DestatisClient, DestatisConfig};
//! use destatis::genesis::{FileFormat, Selection};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DestatisClient::with_config(DestatisConfig::from_env()?)?;
//! let path = client
//!     .download_table("12411-0001", &Selection::new().years(2020, 2023), FileFormat::Csv)
//!     .await?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

pub use destatis_genesis as genesis;

pub mod client;
pub mod colors;
pub mod config;
pub mod error;

pub use client::{ChartSource, DestatisClient};
pub use colors::{ColorHelper, ColorMode};
pub use config::DestatisConfig;
pub use error::{DestatisError, Result};
