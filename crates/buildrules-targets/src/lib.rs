//! Target platform and target rule definitions for buildrules.
//!
//! A build configuration pass is parameterized by:
//! - **Platform:** the enumerated target platform the orchestrator is building for
//! - **Engine version:** the `major.minor` engine release, used for conditional dependencies
//! - **Target rules:** per-executable settings (game or editor) and the modules they pull in

pub mod engine;
pub mod error;
pub mod platform;
pub mod target_rules;

pub use engine::EngineVersion;
pub use error::{Result, TargetError};
pub use platform::TargetPlatform;
pub use target_rules::{BuildSettingsVersion, TargetRules, TargetType};
