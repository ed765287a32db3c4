//! Inbound adapters translating transports onto the domain.

pub mod http;
