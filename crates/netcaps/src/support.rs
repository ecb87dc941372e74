//! Cached capability flags for advanced networking features.
//!
//! Each flag is an explicit compute-once cell: the first `supported()`
//! call evaluates a version-threshold predicate against the probed OS
//! version, and the boolean is cached for the process lifetime. There is
//! no error surface; missing or zero version data simply fails the
//! predicate, and callers fall back to the less-featured code path.

use crate::version::{os_version, VersionTriple};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A lazily-evaluated, process-lifetime capability check.
///
/// The `OnceLock` guarantees the predicate runs at most once even when
/// many threads race on the first call, and that every caller observes
/// the fully-computed boolean.
#[derive(Debug)]
pub struct CapabilityFlag {
    min_major: u32,
    min_build: u32,
    cell: OnceLock<bool>,
}

impl CapabilityFlag {
    /// A flag that is supported on OS versions with
    /// `major >= min_major && build >= min_build`.
    pub const fn new(min_major: u32, min_build: u32) -> Self {
        CapabilityFlag {
            min_major,
            min_build,
            cell: OnceLock::new(),
        }
    }

    /// Whether the host OS meets this capability's version thresholds.
    ///
    /// Idempotent and safe to call concurrently from any thread; the
    /// underlying version probe runs at most once per process.
    pub fn supported(&self) -> bool {
        self.supported_with(os_version)
    }

    /// Like [`CapabilityFlag::supported`], with an injectable version
    /// source.
    ///
    /// The source is consulted only on the first call; later calls return
    /// the cached result without invoking it.
    pub fn supported_with<F>(&self, source: F) -> bool
    where
        F: FnOnce() -> VersionTriple,
    {
        *self.cell.get_or_init(|| {
            let v = source();
            v.major >= self.min_major && v.build >= self.min_build
        })
    }
}

// Build 16299 is Windows 10, version 1709; build 17063 is the insider
// build that introduced AF_UNIX.
static FULL_TCP_KEEPALIVE: CapabilityFlag = CapabilityFlag::new(10, 16299);
static TCP_INITIAL_RTO_NO_SYN_RETRANSMISSIONS: CapabilityFlag = CapabilityFlag::new(10, 16299);
static UNIX_SOCKET: CapabilityFlag = CapabilityFlag::new(10, 17063);

/// Whether the host supports the full set of TCP keep-alive socket
/// options (`TCP_KEEPIDLE`, `TCP_KEEPCNT`, `TCP_KEEPINTVL`).
pub fn supports_full_tcp_keepalive() -> bool {
    FULL_TCP_KEEPALIVE.supported()
}

/// Whether the host supports `TCP_INITIAL_RTO_NO_SYN_RETRANSMISSIONS`.
pub fn supports_tcp_initial_rto_no_syn_retransmissions() -> bool {
    TCP_INITIAL_RTO_NO_SYN_RETRANSMISSIONS.supported()
}

/// Whether the host supports Unix domain sockets.
pub fn supports_unix_socket() -> bool {
    UNIX_SOCKET.supported()
}

/// Snapshot of every networking capability, for diagnostics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub full_tcp_keepalive: bool,
    pub tcp_initial_rto_no_syn_retransmissions: bool,
    pub unix_socket: bool,
}

impl Capabilities {
    /// Detects every capability, triggering the version probe if it has
    /// not run yet.
    pub fn detect() -> Self {
        Capabilities {
            full_tcp_keepalive: supports_full_tcp_keepalive(),
            tcp_initial_rto_no_syn_retransmissions: supports_tcp_initial_rto_no_syn_retransmissions(),
            unix_socket: supports_unix_socket(),
        }
    }
}
