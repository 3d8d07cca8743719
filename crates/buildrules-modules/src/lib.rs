//! Module rules and native link planning.
//!
//! Each module of the project declares its include paths, dependency modules,
//! and compile settings as [`ModuleRules`]. Modules that wrap a prebuilt
//! native library also contribute a [`PlatformLinkPlan`], produced by the
//! [`LinkConfigurationBuilder`] for the platform being built.
//!
//! # Architecture
//!
//! - **Rules:** the declarative data the build orchestrator consumes
//! - **Link:** per-platform static libraries, delay-loads, and runtime copies
//! - **Catalog:** the project's module declarations, looked up by name

pub mod catalog;
pub mod context;
pub mod error;
pub mod link;
pub mod rules;
pub mod zip_utility;

pub use catalog::{builtin_modules, declare, declare_all, find, DeclaredModule, ModuleEntry};
pub use context::{BuildContext, ModuleContext};
pub use error::{ModuleError, Result};
pub use link::{
    LinkConfigurationBuilder, LinkInputs, NativeLibrary, PlatformLinkPlan, RuntimeDependency,
    BINARY_OUTPUT_DIR,
};
pub use rules::{CppStandard, IncludeOrderVersion, IwyuSupport, ModuleRules, PchUsage};
