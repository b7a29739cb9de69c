//! Error types for the cel group engine

use std::collections::TryReserveError;

use thiserror::Error;

use crate::cel::CelId;

/// Failures reported by the cel and group operations
#[derive(Debug, Error)]
pub enum CelGroupError {
    /// The descriptor is not (or no longer) in the cel arena
    #[error("cel {0:?} is not in the arena")]
    UnknownCel(CelId),

    /// The member array could not be allocated
    #[error("failed to allocate group members: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Failures while loading, saving or building a group layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Group error: {0}")]
    Group(#[from] CelGroupError),
}

/// Result type for cel and group operations
pub type Result<T> = std::result::Result<T, CelGroupError>;
