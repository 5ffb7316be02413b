//! One wrapper per section of the web service
//!
//! Every wrapper borrows a [`GenesisClient`](crate::GenesisClient), checks the
//! arguments of a call, and issues exactly one GET request.

mod catalogue;
mod data;
mod find;
mod hello_world;
mod metadata;
mod profile;

pub use catalogue::Catalogue;
pub use data::{ChartOptions, Classifier, CubeOptions, Data, MapOptions, Selection, TableOptions};
pub use find::Find;
pub use hello_world::HelloWorld;
pub use metadata::Metadata;
pub use profile::Profile;
