//! Local Address Port
//!
//! Defines the interface for discovering this host's own address.

use std::net::Ipv4Addr;

/// Provider of the host's primary IPv4 address.
///
/// Used by the target resolver when the upstream runs on the same host
/// and no explicit upstream host is configured.
pub trait LocalAddressProvider: Send + Sync {
    /// First non-loopback IPv4 address across local interfaces, if any.
    fn first_non_loopback_ipv4(&self) -> Option<Ipv4Addr>;
}
