//! Domain entities: input rows, features and datasets

use crate::domain::{Band, GeoRect, LatLon, MeshCode};

/// A (longitude, latitude) pair, GeoJSON order.
pub type Position = [f64; 2];

/// One parsed input row.
///
/// Both fields are optional: a row without a code produces no feature but
/// still counts towards the dataset maximum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    pub code: Option<String>,
    pub value: Option<f64>,
}

impl DataRow {
    pub fn new(code: impl Into<String>, value: f64) -> Self {
        Self {
            code: Some(code.into()),
            value: Some(value),
        }
    }
}

/// A decoded, classified mesh cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub code: MeshCode,
    pub value: Option<f64>,
    /// Closed ring: SW, NW, NE, SE, SW
    pub ring: [Position; 5],
    pub band: Band,
}

impl Feature {
    /// Rectangle spanned by the ring.
    pub fn rect(&self) -> GeoRect {
        let [sw_lon, sw_lat] = self.ring[0];
        let [ne_lon, ne_lat] = self.ring[2];
        GeoRect::new(LatLon::new(sw_lat, sw_lon), LatLon::new(ne_lat, ne_lon))
    }
}

/// Result of one transform pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Features in input row order
    pub features: Vec<Feature>,
    /// Largest row value, 0 when no row carries a positive value
    pub max_value: f64,
    /// Rows whose code failed to decode
    pub error_count: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Union of all feature rectangles, `None` for an empty dataset.
    pub fn bounds(&self) -> Option<GeoRect> {
        self.features
            .iter()
            .map(Feature::rect)
            .reduce(|acc, rect| acc.union(&rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify;

    fn feature(code: &str, value: f64) -> Feature {
        let code = MeshCode::new(code).unwrap();
        let ring = code.decode().ring();
        Feature {
            code,
            value: Some(value),
            ring,
            band: classify(value),
        }
    }

    #[test]
    fn test_feature_rect_matches_decoded_rect() {
        let f = feature("5339352711", 3.0);
        assert_eq!(f.rect(), f.code.decode());
    }

    #[test]
    fn test_empty_dataset_has_no_bounds() {
        assert!(Dataset::default().bounds().is_none());
        assert!(Dataset::default().is_empty());
    }

    #[test]
    fn test_bounds_cover_all_features() {
        let a = feature("5339352711", 1.0);
        let b = feature("5339462744", 1.0);
        let dataset = Dataset {
            features: vec![a.clone(), b.clone()],
            max_value: 1.0,
            error_count: 0,
        };

        let bounds = dataset.bounds().unwrap();

        assert_eq!(bounds.south_west, a.rect().south_west);
        assert_eq!(bounds.north_east, b.rect().north_east);
        assert_eq!(dataset.len(), 2);
    }
}
