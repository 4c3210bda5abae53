//! Infrastructure layer: I/O implementations and DI container
//!
//! Reads rows from tabular files and renders datasets to GeoJSON.

pub mod csv_source;
pub mod di;
pub mod error;
pub mod geojson;
pub mod traits;

pub use error::{InfraError, InfraResult};
