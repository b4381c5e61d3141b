//! Interface Scanner
//!
//! Implements LocalAddressProvider by walking the host's network
//! interfaces with `getifaddrs`.

use crate::domain::ports::LocalAddressProvider;
use std::net::Ipv4Addr;

/// Scans local interfaces for an IPv4 address.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterfaceScanner;

impl InterfaceScanner {
    pub fn new() -> Self {
        Self
    }

    /// All IPv4 addresses assigned to local interfaces, in kernel order.
    #[cfg(unix)]
    pub fn ipv4_addresses(&self) -> Vec<(String, Ipv4Addr)> {
        let mut found = Vec::new();

        unsafe {
            let mut ifaddrs: *mut libc::ifaddrs = std::ptr::null_mut();
            if libc::getifaddrs(&mut ifaddrs) != 0 {
                tracing::warn!(
                    "getifaddrs failed: {}",
                    std::io::Error::last_os_error()
                );
                return found;
            }

            let mut current = ifaddrs;
            while !current.is_null() {
                let ifa = &*current;
                if !ifa.ifa_addr.is_null()
                    && i32::from((*ifa.ifa_addr).sa_family) == libc::AF_INET
                {
                    let name = std::ffi::CStr::from_ptr(ifa.ifa_name)
                        .to_string_lossy()
                        .into_owned();
                    let addr = &*(ifa.ifa_addr as *const libc::sockaddr_in);
                    found.push((name, Ipv4Addr::from(u32::from_be(addr.sin_addr.s_addr))));
                }
                current = ifa.ifa_next;
            }

            libc::freeifaddrs(ifaddrs);
        }

        found
    }

    #[cfg(not(unix))]
    pub fn ipv4_addresses(&self) -> Vec<(String, Ipv4Addr)> {
        Vec::new()
    }
}

impl LocalAddressProvider for InterfaceScanner {
    fn first_non_loopback_ipv4(&self) -> Option<Ipv4Addr> {
        let found = self
            .ipv4_addresses()
            .into_iter()
            .find(|(_, ip)| !ip.is_loopback() && !ip.is_unspecified());

        if let Some((name, ip)) = &found {
            tracing::debug!("discovered local address {} on {}", ip, name);
        }
        found.map(|(_, ip)| ip)
    }
}
