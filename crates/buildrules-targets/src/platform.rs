//! Enumerated target platforms.
//!
//! Mirrors the platform identifiers the build orchestrator passes to each
//! module declaration. Support decisions elsewhere are made by plain equality
//! against these values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// A platform the orchestrator can build for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetPlatform {
    /// 64-bit Windows.
    Win64,
    /// 32-bit Windows.
    Win32,
    /// x86-64 Linux.
    Linux,
    /// AArch64 Linux.
    LinuxArm64,
    /// macOS.
    Mac,
    /// iOS.
    Ios,
    /// Android.
    Android,
}

impl TargetPlatform {
    /// Every known platform, in declaration order.
    pub const ALL: [TargetPlatform; 7] = [
        TargetPlatform::Win64,
        TargetPlatform::Win32,
        TargetPlatform::Linux,
        TargetPlatform::LinuxArm64,
        TargetPlatform::Mac,
        TargetPlatform::Ios,
        TargetPlatform::Android,
    ];

    /// Canonical kebab-case name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            TargetPlatform::Win64 => "win64",
            TargetPlatform::Win32 => "win32",
            TargetPlatform::Linux => "linux",
            TargetPlatform::LinuxArm64 => "linux-arm64",
            TargetPlatform::Mac => "mac",
            TargetPlatform::Ios => "ios",
            TargetPlatform::Android => "android",
        }
    }

    /// Whether this is a Windows desktop platform.
    pub fn is_windows(&self) -> bool {
        matches!(self, TargetPlatform::Win64 | TargetPlatform::Win32)
    }

    /// Subdirectory name used by prebuilt Windows library layouts
    /// (`Lib/Win64`, `dll/Win32`, ...).
    ///
    /// Anything that is not `Win64` maps to `Win32`; callers only ask for
    /// this after deciding the platform is a Windows one.
    pub fn windows_sub_path(&self) -> &'static str {
        if *self == TargetPlatform::Win64 {
            "Win64"
        } else {
            "Win32"
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetPlatform {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "win64" | "windows" | "x64" => Ok(TargetPlatform::Win64),
            "win32" | "x86" => Ok(TargetPlatform::Win32),
            "linux" => Ok(TargetPlatform::Linux),
            "linux-arm64" | "linuxarm64" | "linuxaarch64" => Ok(TargetPlatform::LinuxArm64),
            "mac" | "macos" => Ok(TargetPlatform::Mac),
            "ios" => Ok(TargetPlatform::Ios),
            "android" => Ok(TargetPlatform::Android),
            _ => Err(TargetError::UnknownPlatform {
                name: s.to_string(),
            }),
        }
    }
}
