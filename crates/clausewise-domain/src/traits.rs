//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ModelRequest, RawExtractionBatch};

/// Trait for the external text-extraction model
///
/// Implemented by the infrastructure layer (clausewise-model). Calls are
/// synchronous, potentially slow, and potentially failing; callers on an async
/// runtime must offload them to a blocking thread.
pub trait ExtractionModel {
    /// Error type for model operations
    type Error;

    /// Run extraction over `request.text` and return the raw items
    fn extract(&self, request: &ModelRequest) -> Result<RawExtractionBatch, Self::Error>;
}
