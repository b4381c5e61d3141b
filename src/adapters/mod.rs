//! Adapters Layer
//!
//! Inbound: the HTTP metrics endpoint.
//! Outbound: the upstream pressure client, metric registry and
//! local interface scanner.

pub mod inbound;
pub mod outbound;
