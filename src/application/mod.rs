//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic over whole row collections.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
