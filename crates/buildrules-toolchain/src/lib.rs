//! Compiler toolchain and bundled SDK path resolution.
//!
//! Resolution runs in two steps, each a pure function of the filesystem at
//! call time:
//! - **Locate:** find the installed toolchain root from a primary install
//!   directory, falling back to an operator-configured location
//! - **Resolve:** pick a versioned subdirectory beneath the root and compose
//!   the path to the auxiliary library directory (ATL, `atlmfc`)
//!
//! Neither step fails hard. Filesystem problems are recorded as warnings on a
//! [`Resolution`] and logged, and the caller decides whether a degraded result
//! is acceptable for the current build.

pub mod error;
pub mod fs;
pub mod locator;
pub mod resolution;
pub mod resolver;
pub mod settings;
pub mod version;

pub use error::{ResolveError, Result};
pub use fs::{DirectoryLister, FsLister};
pub use locator::{SearchLocations, ToolchainLocator, ToolchainRoot, FALLBACK_ENV};
pub use resolution::Resolution;
pub use resolver::{SdkLayout, SdkPath, SdkPathResolver};
pub use settings::{ToolchainProbe, ToolchainSettings};
pub use version::{parse_toolchain_version, select_version, VersionSelection};
