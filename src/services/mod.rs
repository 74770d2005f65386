//! Service layer for business logic.
//!
//! This module contains services that coordinate the store, the style
//! registry and the data directory: catalog reads and writes, blueprint
//! loading, brand generation and site export.

pub mod blueprints;
pub mod catalog;
pub mod export;
pub mod generation;

// Re-export commonly used types
pub use blueprints::{BlueprintLoader, BlueprintSet};
pub use catalog::{CatalogService, TradeDetail};
pub use export::export_site;
pub use generation::{BrandGenerator, GenerationOutcome};

use thiserror::Error;

use crate::models::ValidationErrors;
use crate::store::StoreError;

/// Failures the transport layer maps to distinct responses.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation.
    #[error("{0}")]
    Invalid(ValidationErrors),
    /// The slug is already taken.
    #[error("Trade '{0}' already exists")]
    Conflict(String),
    /// The requested trade does not exist.
    #[error("Trade '{0}' not found")]
    NotFound(String),
    /// Anything else (storage, I/O, serialization).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(slug) => Self::Conflict(slug),
            StoreError::Aborted(inner) => Self::Internal(inner),
            other => Self::Internal(anyhow::Error::new(other)),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}
