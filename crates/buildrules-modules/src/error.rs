//! Module catalog error types.

/// Errors that can occur when looking up module declarations.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// No module with this name in the catalog.
    #[error("unknown module: '{name}'")]
    UnknownModule { name: String },
}

/// Result type alias for module operations.
pub type Result<T> = std::result::Result<T, ModuleError>;
