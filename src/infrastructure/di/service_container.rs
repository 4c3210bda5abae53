//! Service container for dependency injection
//!
//! Wires settings into the transformer, row sources and renderers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::application::services::DatasetTransformer;
use crate::config::Settings;
use crate::infrastructure::csv_source::CsvRowSource;
use crate::infrastructure::geojson::{GeoJsonRenderer, RenderTarget};
use crate::infrastructure::InfraResult;

/// Container holding the configured services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Row-to-feature transformer
    pub transformer: DatasetTransformer,
}

impl ServiceContainer {
    /// Create a new service container from loaded settings.
    pub fn new(settings: Settings) -> Self {
        let transformer = DatasetTransformer::new(settings.transform.diagnostic_limit);
        Self {
            settings: Arc::new(settings),
            transformer,
        }
    }

    /// CSV source for a file on disk.
    pub fn csv_file(&self, path: &Path) -> InfraResult<CsvRowSource<BufReader<File>>> {
        CsvRowSource::open(path, &self.settings.csv)
    }

    /// CSV source for an arbitrary reader (e.g. stdin).
    pub fn csv_reader<R: Read>(&self, reader: R, origin: &str) -> CsvRowSource<R> {
        CsvRowSource::from_reader(reader, origin, &self.settings.csv)
    }

    /// GeoJSON renderer using the configured style.
    pub fn renderer(&self, target: RenderTarget) -> GeoJsonRenderer {
        GeoJsonRenderer::new(target, self.settings.style.clone())
    }
}
