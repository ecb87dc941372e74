//! Host OS version probing.
//!
//! The native version query runs at most once per process. The result is
//! memoized in a `OnceLock` and shared by every capability flag; the OS
//! version cannot change underneath a running process, so caching it
//! forever is safe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Mask clearing the reserved high bits of a raw build number.
///
/// The native API may set bit `0x8000` and above for non-release builds;
/// the numeric build value is the low 15 bits.
pub const BUILD_NUMBER_MASK: u32 = 0x7fff;

/// The (major, minor, build) identifier of the host operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl VersionTriple {
    /// The triple reported when no version information is available.
    /// Every capability predicate evaluates to `false` against it.
    pub const ZERO: VersionTriple = VersionTriple {
        major: 0,
        minor: 0,
        build: 0,
    };

    /// Builds a triple from raw probe output, clearing the reserved high
    /// bits of the build number.
    pub fn from_raw(major: u32, minor: u32, raw_build: u32) -> Self {
        VersionTriple {
            major,
            minor,
            build: raw_build & BUILD_NUMBER_MASK,
        }
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

/// Host OS version, probed once per process.
///
/// The first caller pays for the native query; every later caller reads
/// the cached triple.
pub fn os_version() -> VersionTriple {
    static VERSION: OnceLock<VersionTriple> = OnceLock::new();
    *VERSION.get_or_init(|| {
        let v = probe_version();
        tracing::debug!(major = v.major, minor = v.minor, build = v.build, "probed host OS version");
        v
    })
}

#[cfg(windows)]
fn probe_version() -> VersionTriple {
    use windows::Wdk::System::SystemServices::RtlGetVersion;
    use windows::Win32::System::SystemInformation::OSVERSIONINFOW;

    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    // On a non-success status the struct stays zeroed and the triple
    // degrades to ZERO, so every capability reports false.
    let _ = unsafe { RtlGetVersion(&mut info) };
    VersionTriple::from_raw(info.dwMajorVersion, info.dwMinorVersion, info.dwBuildNumber)
}

#[cfg(not(windows))]
fn probe_version() -> VersionTriple {
    VersionTriple::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_masks_reserved_bits() {
        let v = VersionTriple::from_raw(10, 0, 0x8000 | 16299);
        assert_eq!(v.build, 16299);

        // Release builds pass through unchanged.
        let v = VersionTriple::from_raw(10, 0, 17063);
        assert_eq!(v.build, 17063);
    }

    #[test]
    fn test_mask_clears_everything_above_bit_14() {
        let v = VersionTriple::from_raw(10, 0, 0xffff_0000 | 7601);
        assert_eq!(v.build, 7601);
        assert_eq!(VersionTriple::from_raw(0, 0, 0x8000).build, 0);
    }

    #[test]
    fn test_display() {
        let v = VersionTriple::from_raw(10, 0, 19045);
        assert_eq!(v.to_string(), "10.0.19045");
    }

    #[test]
    fn test_os_version_is_stable() {
        assert_eq!(os_version(), os_version());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let v = VersionTriple::from_raw(6, 1, 7601);
        let json = serde_json::to_string(&v).unwrap();
        let parsed: VersionTriple = serde_json::from_str(&json).unwrap();
        assert_eq!(v, parsed);
    }
}
