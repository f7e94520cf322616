//! Outbound ports: the forwarding strategy consumed by the core.
//!
//! Delivery algorithms live outside this crate. The core resolves a
//! [`Forwarder`] binding from an address's semantics exactly once, at
//! address creation, through the [`ForwarderResolver`] injected at core
//! start; it stores the binding and hands payloads across it.

use std::sync::Arc;

use crate::domain::{AddressSemantics, Field};

/// Forwarding strategy bound to an address.
pub trait Forwarder: Send + Sync {
    /// The policy tag this forwarder implements.
    fn semantics(&self) -> AddressSemantics;

    /// Deliver a payload toward the address's interested parties.
    /// Returns the number of deliveries initiated.
    fn forward(&self, payload: &Field) -> usize;
}

/// Maps a semantics tag to a forwarder binding at address-creation time.
pub trait ForwarderResolver: Send + Sync {
    fn resolve(&self, semantics: AddressSemantics) -> Arc<dyn Forwarder>;
}

/// Forwarder that drops every payload. Used by cores that only mutate
/// routing state, and by tests.
#[derive(Clone, Copy, Debug)]
pub struct NullForwarder {
    semantics: AddressSemantics,
}

impl NullForwarder {
    pub fn new(semantics: AddressSemantics) -> Self {
        Self { semantics }
    }
}

impl Forwarder for NullForwarder {
    fn semantics(&self) -> AddressSemantics {
        self.semantics
    }

    fn forward(&self, _payload: &Field) -> usize {
        0
    }
}

/// Resolver returning a [`NullForwarder`] for every semantics tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullResolver;

impl ForwarderResolver for NullResolver {
    fn resolve(&self, semantics: AddressSemantics) -> Arc<dyn Forwarder> {
        Arc::new(NullForwarder::new(semantics))
    }
}
