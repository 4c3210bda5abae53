//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod transform;

pub use transform::{DatasetTransformer, RowFailure, DEFAULT_DIAGNOSTIC_LIMIT};
