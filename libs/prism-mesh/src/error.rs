//! # Mesh Errors
//!
//! Error types for prism meshing.
//!
//! ## Error Policy
//!
//! - Invalid configuration fails fast, before any geometry work
//! - Degenerate geometry never errors: it is skipped or downgraded locally
//! - Non-manifold topology is reported as data by `MeshAdjacency`

use thiserror::Error;

/// Errors that can occur while meshing a structure or reading mesh files.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A `MesherOptions` field violates its documented constraint.
    #[error("Invalid option `{field}`: {reason}")]
    InvalidOption {
        /// Name of the offending field
        field: &'static str,
        /// Violated constraint
        reason: String,
    },

    /// The structure description is inconsistent.
    #[error("Invalid structure: {message}")]
    InvalidStructure { message: String },

    /// A fast-path cap grid would exceed the cell limit.
    #[error("Too many cap grid cells: {count} (max: {max})")]
    TooManyCells { count: usize, max: usize },

    /// An edge or the extrusion height would be split into too many pieces.
    #[error("Too many {what} subdivisions: {count} (max: {max})")]
    TooManySubdivisions {
        /// Which quantity was being subdivided
        what: &'static str,
        count: usize,
        max: usize,
    },

    /// The build observed its cancellation flag between stages.
    #[error("Meshing cancelled")]
    Cancelled,

    /// Malformed legacy interchange input.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates an invalid option error.
    pub fn invalid_option(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Creates a subdivision limit error.
    pub fn too_many_subdivisions(what: &'static str, count: usize, max: usize) -> Self {
        Self::TooManySubdivisions { what, count, max }
    }

    /// Creates a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;
