//! Domain layer: mesh codes, value bands and datasets
//!
//! Pure computations only (no I/O, no CLI, no config loading).

pub mod classify;
pub mod entities;
pub mod error;
pub mod mesh;

pub use classify::{classify, classify_with_max, Band, BREAKPOINTS};
pub use entities::{DataRow, Dataset, Feature, Position};
pub use error::{DomainError, DomainResult};
pub use mesh::{decode, GeoRect, LatLon, MeshCode, MESH_CODE_LEN};
