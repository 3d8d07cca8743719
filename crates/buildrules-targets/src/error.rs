//! Error types for target and platform operations.

/// Errors that can occur while parsing or looking up target definitions.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// Platform name did not match any known platform.
    #[error("unknown target platform: '{name}'")]
    UnknownPlatform {
        /// The name that failed to parse.
        name: String,
    },

    /// Engine version string could not be parsed.
    #[error("invalid engine version '{input}': {detail}")]
    InvalidEngineVersion {
        /// The rejected input.
        input: String,
        /// Description of what was wrong with it.
        detail: String,
    },

    /// No built-in target with this name.
    #[error("unknown target: '{name}'")]
    UnknownTarget {
        /// The requested target name.
        name: String,
    },

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
