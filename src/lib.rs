//! meshmap - JIS X 0410 regional mesh codes to choropleth features
//!
//! The core is pure: [`domain::decode`] turns a 10-digit mesh code into a
//! rectangle, [`domain::classify`] maps a value to a color band, and
//! [`application::services::DatasetTransformer`] turns parsed rows into a
//! [`domain::Dataset`]. Reading CSV and writing GeoJSON live in
//! [`infrastructure`].
//!
//! ```
//! use meshmap::application::services::DatasetTransformer;
//! use meshmap::domain::{decode, Band, DataRow};
//!
//! let rect = decode("5339352711").unwrap();
//! assert!(rect.north_east.lat > rect.south_west.lat);
//!
//! let dataset = DatasetTransformer::default().transform(&[DataRow::new("5339352711", 42.0)]);
//! assert_eq!(dataset.features[0].band, Band::Over20);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
