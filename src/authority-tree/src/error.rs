//! Error types for the authority tree

use thiserror::Error;

/// Authority tree errors
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// The requested root authority is not part of the role set
    #[error("Root authority not found: {0}")]
    MissingRoot(String),

    /// A direct child entry names an authority with no tree node
    #[error("Dangling child reference: {parent} -> {child}")]
    DanglingChild {
        /// Authority whose child list holds the reference
        parent: String,
        /// The unresolved child name
        child: String,
    },

    /// Lookup of an authority that is not part of the role set
    #[error("Unknown authority: {0}")]
    UnknownRole(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for authority tree operations
pub type Result<T> = std::result::Result<T, HierarchyError>;
