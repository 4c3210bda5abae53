//! GeoJSON rendering
//!
//! Writes a [`Dataset`] as a `FeatureCollection` of polygons. Each feature
//! carries its code, value and band plus the configured fill/outline style,
//! so any GeoJSON viewer can draw the choropleth without extra styling.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::StyleSettings;
use crate::domain::{Dataset, Feature, Position};
use crate::infrastructure::traits::RenderAdapter;
use crate::infrastructure::{InfraError, InfraResult};

/// GeoJSON `FeatureCollection` borrowing from a dataset.
#[derive(Debug, Serialize)]
pub struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<[f64; 4]>,
    features: Vec<GeoJsonFeature<'a>>,
}

#[derive(Debug, Serialize)]
struct GeoJsonFeature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: Properties<'a>,
    geometry: Polygon<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Properties<'a> {
    code: &'a str,
    value: Option<f64>,
    band: &'static str,
    fill_color: &'static str,
    weight: f64,
    opacity: f64,
    color: &'a str,
    dash_array: &'a str,
    fill_opacity: f64,
}

#[derive(Debug, Serialize)]
struct Polygon<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [&'a [Position; 5]; 1],
}

impl<'a> FeatureCollection<'a> {
    pub fn from_dataset(dataset: &'a Dataset, style: &'a StyleSettings) -> Self {
        Self {
            kind: "FeatureCollection",
            bbox: dataset.bounds().map(|b| b.to_bbox()),
            features: dataset
                .features
                .iter()
                .map(|f| GeoJsonFeature::new(f, style))
                .collect(),
        }
    }

    /// Number of features in the collection.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> InfraResult<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|source| InfraError::Json { source })
    }

    pub fn to_value(&self) -> InfraResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|source| InfraError::Json { source })
    }
}

impl<'a> GeoJsonFeature<'a> {
    fn new(feature: &'a Feature, style: &'a StyleSettings) -> Self {
        Self {
            kind: "Feature",
            properties: Properties {
                code: feature.code.as_str(),
                value: feature.value,
                band: feature.band.label(),
                fill_color: feature.band.color(),
                weight: style.weight,
                opacity: style.opacity,
                color: &style.color,
                dash_array: &style.dash_array,
                fill_opacity: style.fill_opacity,
            },
            geometry: Polygon {
                kind: "Polygon",
                coordinates: [&feature.ring],
            },
        }
    }
}

/// Where rendered documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    Stdout,
    /// File is truncated on every render
    File(PathBuf),
}

/// Render adapter writing the current dataset as a GeoJSON document.
#[derive(Debug)]
pub struct GeoJsonRenderer {
    target: RenderTarget,
    style: StyleSettings,
    current: Option<Dataset>,
}

impl GeoJsonRenderer {
    pub fn new(target: RenderTarget, style: StyleSettings) -> Self {
        Self {
            target,
            style,
            current: None,
        }
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    fn write(&self, dataset: &Dataset) -> InfraResult<()> {
        let collection = FeatureCollection::from_dataset(dataset, &self.style);
        match &self.target {
            RenderTarget::Stdout => {
                let mut out = io::stdout().lock();
                collection.to_writer(&mut out)?;
                writeln!(out).map_err(|e| InfraError::io("write stdout", e))?;
            }
            RenderTarget::File(path) => {
                let file = File::create(path)
                    .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
                let mut out = BufWriter::new(file);
                collection.to_writer(&mut out)?;
                writeln!(out)
                    .and_then(|_| out.flush())
                    .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
                info!(
                    "wrote {} features to {}",
                    collection.len(),
                    path.display()
                );
            }
        }
        Ok(())
    }
}

impl RenderAdapter for GeoJsonRenderer {
    fn replace(&mut self, dataset: Dataset) -> InfraResult<()> {
        if let Some(previous) = self.current.take() {
            debug!("replacing dataset with {} features", previous.len());
        }
        self.write(&dataset)?;
        self.current = Some(dataset);
        Ok(())
    }

    fn current(&self) -> Option<&Dataset> {
        self.current.as_ref()
    }
}
