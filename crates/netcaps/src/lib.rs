//! Cached capability checks for the host OS networking stack.
//!
//! Connection setup wants to know whether advanced TCP options are
//! available on the running OS release before configuring a socket:
//! - Full TCP keep-alive tuning (Windows 10, version 1709)
//! - `TCP_INITIAL_RTO_NO_SYN_RETRANSMISSIONS` (Windows 10.0.16299)
//! - Unix domain sockets (Windows 10, build 17063)
//!
//! Each check is a version-threshold predicate over the host OS version,
//! evaluated lazily on first use and cached for the process lifetime.
//! The native version query itself runs at most once per process, no
//! matter how many threads race on the first check.
//!
//! On non-Windows hosts the version probe reports the zero triple, so
//! every capability answers `false` and callers take their portable
//! fallback path.

pub mod support;
pub mod version;

pub use support::{
    supports_full_tcp_keepalive, supports_tcp_initial_rto_no_syn_retransmissions,
    supports_unix_socket, Capabilities, CapabilityFlag,
};
pub use version::{os_version, VersionTriple, BUILD_NUMBER_MASK};
