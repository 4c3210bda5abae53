//! I/O boundary traits
//!
//! Rows come in through a [`RowSource`], datasets go out through a
//! [`RenderAdapter`]. Both can be swapped for in-memory versions in tests.

use crate::domain::{DataRow, Dataset};
use crate::infrastructure::InfraResult;

/// Supplier of parsed input rows.
pub trait RowSource {
    /// Read all rows, in file order.
    fn read_rows(&mut self) -> InfraResult<Vec<DataRow>>;
}

/// Consumer of transform output.
///
/// The adapter owns the dataset it currently shows. A new dataset replaces
/// the previous one entirely.
pub trait RenderAdapter {
    /// Drop the current dataset and render `dataset` in its place.
    fn replace(&mut self, dataset: Dataset) -> InfraResult<()>;

    /// Dataset rendered by the last successful `replace`.
    fn current(&self) -> Option<&Dataset>;
}

// ============================================================
// IN-MEMORY IMPLEMENTATIONS
// ============================================================

/// Row source over rows already in memory.
#[derive(Debug, Default, Clone)]
pub struct VecRowSource {
    rows: Vec<DataRow>,
}

impl VecRowSource {
    pub fn new(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for VecRowSource {
    fn read_rows(&mut self) -> InfraResult<Vec<DataRow>> {
        Ok(self.rows.clone())
    }
}

/// Render adapter that only keeps the current dataset.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    current: Option<Dataset>,
    /// Number of successful replacements
    pub renders: usize,
}

impl RenderAdapter for MemoryRenderer {
    fn replace(&mut self, dataset: Dataset) -> InfraResult<()> {
        self.current = Some(dataset);
        self.renders += 1;
        Ok(())
    }

    fn current(&self) -> Option<&Dataset> {
        self.current.as_ref()
    }
}
