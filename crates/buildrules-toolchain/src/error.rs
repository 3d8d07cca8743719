//! Toolchain resolution error types.

use std::path::PathBuf;

/// Reasons a toolchain or SDK path could not be fully resolved.
///
/// These are usually carried as warnings on a [`Resolution`](crate::Resolution)
/// rather than returned, so a configuration pass can continue with a degraded
/// result.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Neither install location produced a usable toolchain root.
    #[error("toolchain root not found: {detail}")]
    MissingToolchainRoot { detail: String },

    /// The versions directory exists but holds no version subdirectories.
    #[error("no version directories under {}", path.display())]
    MissingVersionedSubdirectory { path: PathBuf },

    /// A composed path does not exist on disk.
    #[error("resolved path does not exist: {}", path.display())]
    MissingArtifactOnDisk { path: PathBuf },

    /// Filesystem access failed.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for toolchain operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
