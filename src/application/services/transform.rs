//! Row-to-feature transform
//!
//! Turns parsed rows into a [`Dataset`]: decodes each mesh code, classifies
//! the value and collects features in input order. Decode failures are
//! counted and skipped, never returned.

use tracing::{debug, error, info};

use crate::domain::{
    classify_with_max, Band, DataRow, Dataset, DomainError, Feature, MeshCode,
};

/// How many decode failures are reported individually per transform.
pub const DEFAULT_DIAGNOSTIC_LIMIT: usize = 5;

/// A row that could not be turned into a feature.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// Zero-based position of the row in the input
    pub index: usize,
    pub code: String,
    pub error: DomainError,
}

/// Service building datasets from row collections.
#[derive(Debug, Clone)]
pub struct DatasetTransformer {
    diagnostic_limit: usize,
}

impl Default for DatasetTransformer {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGNOSTIC_LIMIT)
    }
}

impl DatasetTransformer {
    /// Create a transformer reporting at most `diagnostic_limit` failures.
    pub fn new(diagnostic_limit: usize) -> Self {
        Self { diagnostic_limit }
    }

    pub fn diagnostic_limit(&self) -> usize {
        self.diagnostic_limit
    }

    /// Build a dataset from `rows`.
    pub fn transform(&self, rows: &[DataRow]) -> Dataset {
        self.transform_with(rows, |_| {})
    }

    /// Build a dataset from `rows`, passing the first failures to `on_failure`.
    ///
    /// `on_failure` sees at most `diagnostic_limit` failures; all failures are
    /// counted in [`Dataset::error_count`].
    pub fn transform_with<F>(&self, rows: &[DataRow], mut on_failure: F) -> Dataset
    where
        F: FnMut(&RowFailure),
    {
        let max_value = max_value(rows);
        debug!("transform: rows={} max_value={}", rows.len(), max_value);

        let mut features = Vec::with_capacity(rows.len());
        let mut error_count = 0usize;

        for (index, row) in rows.iter().enumerate() {
            let Some(code) = row.code.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };

            match MeshCode::new(code) {
                Ok(code) => features.push(build_feature(code, row.value, max_value)),
                Err(e) => {
                    error_count += 1;
                    if error_count <= self.diagnostic_limit {
                        error!("mesh convert error: row={} code={:?}: {}", index, code, e);
                        on_failure(&RowFailure {
                            index,
                            code: code.to_string(),
                            error: e,
                        });
                    }
                }
            }
        }

        info!(
            "generated {} features, errors: {}",
            features.len(),
            error_count
        );

        Dataset {
            features,
            max_value,
            error_count,
        }
    }
}

/// Largest value over all rows, starting from 0. Rows without a value and
/// NaN values never raise the maximum.
fn max_value(rows: &[DataRow]) -> f64 {
    rows.iter()
        .filter_map(|row| row.value)
        .fold(0.0, |max, v| if v > max { v } else { max })
}

fn build_feature(code: MeshCode, value: Option<f64>, max_value: f64) -> Feature {
    let ring = code.decode().ring();
    let band = match value {
        Some(v) => classify_with_max(v, max_value),
        None => Band::UpTo10,
    };
    Feature {
        code,
        value,
        ring,
        band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_value_ignores_missing_and_nan() {
        let rows = vec![
            DataRow {
                code: None,
                value: Some(f64::NAN),
            },
            DataRow {
                code: None,
                value: None,
            },
            DataRow::new("5339352711", 7.5),
        ];
        assert_eq!(max_value(&rows), 7.5);
    }

    #[test]
    fn test_max_value_of_negative_rows_is_zero() {
        let rows = vec![DataRow::new("5339352711", -3.0)];
        assert_eq!(max_value(&rows), 0.0);
    }

    #[test]
    fn test_feature_without_value_gets_lowest_band() {
        let code = MeshCode::new("5339352711").unwrap();
        let feature = build_feature(code, None, 100.0);
        assert_eq!(feature.band, Band::UpTo10);
        assert_eq!(feature.value, None);
    }

    #[test]
    fn test_zero_diagnostic_limit_still_counts_errors() {
        let transformer = DatasetTransformer::new(0);
        let rows = vec![DataRow::new("123", 1.0), DataRow::new("45", 1.0)];

        let mut reported = 0;
        let dataset = transformer.transform_with(&rows, |_| reported += 1);

        assert_eq!(reported, 0);
        assert_eq!(dataset.error_count, 2);
    }
}
